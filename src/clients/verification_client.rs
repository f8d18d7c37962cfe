use tracing::{debug, instrument};
use uuid::Uuid;

use crate::actor_framework::ResourceClient;
use crate::domain::{Verification, VerificationCreate};
use crate::verification_actor::VerificationError;

/// Client for the create-only `verifications` store.
#[derive(Clone)]
pub struct VerificationClient {
    inner: ResourceClient<Verification>,
}

crate::impl_basic_client!(VerificationClient, Verification, VerificationError, verification, verifications);

impl VerificationClient {
    /// A fresh record id in the store's own `verification_<uuid>` shape, for
    /// callers that must reference the record before it is written.
    pub fn allocate_id(&self) -> String {
        format!("verification_{}", Uuid::new_v4().simple())
    }

    /// Writes a record under an id from [`Self::allocate_id`].
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub async fn record_as(&self, id: String, params: VerificationCreate) -> Result<String, VerificationError> {
        debug!("Sending request");
        let record = self.inner.put(id, params).await?;
        Ok(record.id)
    }

    #[instrument(skip(self))]
    pub async fn verifications_for_order(&self, order_id: &str) -> Result<Vec<Verification>, VerificationError> {
        debug!("Sending request");
        let order_id = order_id.to_string();
        Ok(self.inner.query(move |v: &Verification| v.order_id == order_id).await?)
    }
}
