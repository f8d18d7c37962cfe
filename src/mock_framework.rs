//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

pub type Responder<R, T> = oneshot::Sender<Result<R, FrameworkError<<T as Entity>::Error>>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so the test plays the
/// store: it inspects each request and answers it (success, failure, or not at all).
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T::Id, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Responder<Option<T>, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Put request
pub async fn expect_put<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::CreateParams, Responder<T, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Put { id, params, respond_to }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List (or query) request.
/// The filter, if any, is applied to `items` before they are sent back.
pub async fn expect_list_and_reply<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>, items: Vec<T>) -> bool {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => {
            let matched = items
                .into_iter()
                .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                .collect();
            respond_to.send(Ok(matched)).is_ok()
        }
        _ => false,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rider, RiderCreate, VehicleType};
    use crate::profile_actor::{ProfileError, RiderAction, RiderActionResult};

    fn rider_params() -> RiderCreate {
        RiderCreate {
            rider_name: "Ravi".to_string(),
            email: "ravi@ride.in".to_string(),
            phone: "9000000000".to_string(),
            vehicle_type: VehicleType::Bike,
            vehicle_number: "MH15 AB 1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Rider>(10);

        let put_task = tokio::spawn({
            let client = client.clone();
            async move { client.put("uid_1".to_string(), rider_params()).await }
        });
        let (id, params, responder) = expect_put(&mut receiver).await.expect("Expected Put request");
        assert_eq!(id, "uid_1");
        assert_eq!(params.rider_name, "Ravi");
        responder
            .send(Err(FrameworkError::Entity(ProfileError::NotFound("uid_1".to_string()))))
            .unwrap();
        assert!(put_task.await.unwrap().is_err());

        let action_task = tokio::spawn(async move {
            client
                .perform_action("uid_1".to_string(), RiderAction::CreditDelivery { amount: 90 })
                .await
        });
        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "uid_1");
        assert!(matches!(action, RiderAction::CreditDelivery { amount: 90 }));
        responder
            .send(Ok(RiderActionResult::CreditDelivery {
                total_earnings: 90,
                total_deliveries: 1,
            }))
            .unwrap();
        assert!(action_task.await.unwrap().is_ok());
    }
}
