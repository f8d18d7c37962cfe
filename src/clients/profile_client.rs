use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Business, BusinessCreate, Farmer, FarmerCreate, Rider, RiderCreate};
use crate::earnings::FarmerEarnings;
use crate::profile_actor::{FarmerAction, ProfileError, RiderAction, RiderActionResult};

// =============================================================================
// 1. Farmer Client
// =============================================================================

#[derive(Clone)]
pub struct FarmerClient {
    inner: ResourceClient<Farmer>,
}

crate::impl_basic_client!(FarmerClient, Farmer, ProfileError, farmer, farmers);

impl FarmerClient {
    /// Stores the profile under the auth uid.
    #[instrument(skip(self, params))]
    pub async fn register(&self, uid: String, params: FarmerCreate) -> Result<Farmer, ProfileError> {
        debug!("Sending request");
        Ok(self.inner.put(uid, params).await?)
    }

    #[instrument(skip(self))]
    pub async fn record_earnings(&self, id: String, earnings: FarmerEarnings) -> Result<(), ProfileError> {
        debug!("Sending request");
        self.inner.perform_action(id, FarmerAction::RecordEarnings(earnings)).await?;
        Ok(())
    }
}

// =============================================================================
// 2. Business Client
// =============================================================================

#[derive(Clone)]
pub struct BusinessClient {
    inner: ResourceClient<Business>,
}

crate::impl_basic_client!(BusinessClient, Business, ProfileError, business, businesses);

impl BusinessClient {
    #[instrument(skip(self, params))]
    pub async fn register(&self, uid: String, params: BusinessCreate) -> Result<Business, ProfileError> {
        debug!("Sending request");
        Ok(self.inner.put(uid, params).await?)
    }
}

// =============================================================================
// 3. Rider Client
// =============================================================================

#[derive(Clone)]
pub struct RiderClient {
    inner: ResourceClient<Rider>,
}

crate::impl_basic_client!(RiderClient, Rider, ProfileError, rider, riders);

impl RiderClient {
    #[instrument(skip(self, params))]
    pub async fn register(&self, uid: String, params: RiderCreate) -> Result<Rider, ProfileError> {
        debug!("Sending request");
        Ok(self.inner.put(uid, params).await?)
    }

    /// Adds one delivery's payout to the wallet. Returns the new totals.
    #[instrument(skip(self))]
    pub async fn credit_delivery(&self, id: String, amount: u32) -> Result<(u64, u32), ProfileError> {
        debug!("Sending request");
        let RiderActionResult::CreditDelivery {
            total_earnings,
            total_deliveries,
        } = self.inner.perform_action(id, RiderAction::CreditDelivery { amount }).await?;
        info!(total_earnings, total_deliveries, "Rider wallet credited");
        Ok((total_earnings, total_deliveries))
    }
}
