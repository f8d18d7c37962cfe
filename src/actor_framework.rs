use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// A document type held in one collection of the store.
///
/// Every hook runs against a draft copy of the document. The draft only
/// replaces the stored document when the hook returns `Ok`, so a rejected
/// patch or action never leaves a half-applied document behind.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: Display + Debug + Clone + Send + Sync + 'static;

    /// Collection name, used in logs and not-found errors.
    const COLLECTION: &'static str;

    /// Construct the full document from the store-assigned id and the params.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Apply a domain-specific atomic operation to a single document.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors raised by the store itself, wrapping the entity's own error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("{collection} document not found: {id}")]
    NotFound { collection: &'static str, id: String },
    #[error("{0} store closed")]
    ActorClosed(&'static str),
    #[error("{0} store dropped the request")]
    ActorDropped(&'static str),
    #[error("{0}")]
    Entity(E),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Client-side predicate evaluated inside the store during a scan.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Filter(..)")
    }
}

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Put {
        id: T::Id,
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one collection. Requests are applied one at a time, which makes every
/// single-document operation atomic with respect to every other.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "store", fields(collection = T::COLLECTION), skip(self))]
    pub async fn run(mut self) {
        info!("Store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Put { id, params, respond_to } => {
                    let _ = respond_to.send(self.handle_put(id, params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self
                        .store
                        .values()
                        .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                        .cloned()
                        .collect::<Vec<_>>();
                    debug!(count = items.len(), "Scan complete");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = self.with_draft(&id, |draft| draft.on_update(patch).map(|_| draft.clone()));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(&id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = self.with_draft(&id, |draft| draft.handle_action(action));
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("Store stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        debug!(id = %id, "Document created");
        Ok(id)
    }

    fn handle_put(&mut self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item.clone());
        debug!(id = %id, "Document set");
        Ok(item)
    }

    fn handle_delete(&mut self, id: &T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self.store.get(id).ok_or_else(|| Self::not_found(id))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(id);
        debug!(id = %id, "Document deleted");
        Ok(())
    }

    /// Run `apply` against a copy of the document and commit the copy on success.
    fn with_draft<R>(
        &mut self,
        id: &T::Id,
        apply: impl FnOnce(&mut T) -> Result<R, T::Error>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let item = self.store.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        let mut draft = item.clone();
        match apply(&mut draft) {
            Ok(result) => {
                *item = draft;
                Ok(result)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Write rejected");
                Err(FrameworkError::Entity(e))
            }
        }
    }

    fn not_found(id: &T::Id) -> FrameworkError<T::Error> {
        FrameworkError::NotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would demand `T: Clone` on top of the entity bound.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed(T::COLLECTION))?;
        response
            .await
            .map_err(|_| FrameworkError::ActorDropped(T::COLLECTION))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn put(&self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Put { id, params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { filter: None, respond_to }).await
    }

    pub async fn query(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError<T::Error>> {
        let filter = Some(Filter::new(predicate));
        self.request(|respond_to| ResourceRequest::List { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

/// Fold a store error into a domain error type that has `NotFound(String)`
/// and `ActorCommunicationError(String)` variants, so clients can use `?`.
#[macro_export]
macro_rules! impl_from_framework_error {
    ($error:ty) => {
        impl From<$crate::actor_framework::FrameworkError<$error>> for $error {
            fn from(err: $crate::actor_framework::FrameworkError<$error>) -> Self {
                use $crate::actor_framework::FrameworkError;
                match err {
                    FrameworkError::Entity(e) => e,
                    FrameworkError::NotFound { id, .. } => <$error>::NotFound(id),
                    other => <$error>::ActorCommunicationError(other.to_string()),
                }
            }
        }
    };
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
