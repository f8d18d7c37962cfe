use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Listing, ListingCreate, ListingPatch, ListingStatus};
use crate::listing_actor::ListingError;
use crate::provenance::ProvenancePayload;

/// Client for the `listings` store.
#[derive(Clone)]
pub struct ListingClient {
    inner: ResourceClient<Listing>,
}

crate::impl_basic_client!(ListingClient, Listing, ListingError, listing, listings);

impl ListingClient {
    #[instrument(skip(self, params), fields(farmer_id = %params.origin.farmer_id))]
    pub async fn create_listing(&self, params: ListingCreate) -> Result<String, ListingError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(listing_id = %id, "Listing created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_listing(&self, farmer_id: &str, id: String, patch: ListingPatch) -> Result<Listing, ListingError> {
        debug!("Sending request");
        self.owned_by(farmer_id, &id).await?;
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_listing(&self, farmer_id: &str, id: String) -> Result<(), ListingError> {
        debug!("Sending request");
        self.owned_by(farmer_id, &id).await?;
        self.inner.delete(id.clone()).await?;
        info!(listing_id = %id, "Listing deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn listings_for_farmer(&self, farmer_id: &str) -> Result<Vec<Listing>, ListingError> {
        debug!("Sending request");
        let owner = farmer_id.to_string();
        let mut listings = self.inner.query(move |l: &Listing| l.farmer_id() == owner).await?;
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    /// Every active listing, in store order.
    #[instrument(skip(self))]
    pub async fn active_listings(&self) -> Result<Vec<Listing>, ListingError> {
        debug!("Sending request");
        Ok(self.inner.query(|l: &Listing| l.status == ListingStatus::Active).await?)
    }

    /// Fresh QR payload for the listing as it stands now.
    #[instrument(skip(self))]
    pub async fn issue_provenance(&self, id: String) -> Result<ProvenancePayload, ListingError> {
        debug!("Sending request");
        let listing = self
            .inner
            .get(id.clone())
            .await?
            .ok_or(ListingError::NotFound(id))?;
        Ok(ProvenancePayload::issue(&listing))
    }

    async fn owned_by(&self, farmer_id: &str, id: &str) -> Result<Listing, ListingError> {
        let listing = self
            .inner
            .get(id.to_string())
            .await?
            .ok_or_else(|| ListingError::NotFound(id.to_string()))?;
        if listing.farmer_id() != farmer_id {
            warn!(listing_id = %id, "Listing owned by another farmer");
            return Err(ListingError::NotOwner {
                listing_id: id.to_string(),
                farmer_id: farmer_id.to_string(),
            });
        }
        Ok(listing)
    }
}
