use chrono::Utc;
use tracing::{info, instrument};

use super::PortalError;
use crate::auth::{AuthClient, AuthError, FarmerSignUp, Role, SessionContext, SignInForm};
use crate::clients::{FarmerClient, ListingClient, OrderClient};
use crate::domain::{
    FarmOrigin, Farmer, FlashSale, Grade, Listing, ListingCreate, ListingPatch, ListingStatus, Order, OrderStatus,
};
use crate::earnings::FarmerEarnings;
use crate::listing_actor::ListingError;
use crate::media::CapturedImage;

/// What the farmer fills in on the add-product form.
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub grade: Grade,
    pub description: String,
    pub image: Option<CapturedImage>,
    pub flash_sale: Option<FlashSale>,
}

/// The farmer (seller) portal: listings, QR labels, incoming orders and earnings.
pub struct FarmerPortal {
    session: SessionContext,
    farmers: FarmerClient,
    listings: ListingClient,
    orders: OrderClient,
    max_image_bytes: usize,
}

impl FarmerPortal {
    pub fn new(
        auth: AuthClient,
        farmers: FarmerClient,
        listings: ListingClient,
        orders: OrderClient,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            session: SessionContext::new(auth, Role::Farmer),
            farmers,
            listings,
            orders,
            max_image_bytes,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn register(&self, form: FarmerSignUp) -> Result<Farmer, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        let session = self.session.sign_up(&form.email, &form.password).await?;
        let farmer = self.farmers.register(session.uid, form.profile()).await?;
        info!(farmer_id = %farmer.id, "Farmer registered");
        Ok(farmer)
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn sign_in(&self, form: SignInForm) -> Result<Farmer, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        self.session.sign_in(&form.email, &form.password).await?;
        self.profile().await
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    pub async fn profile(&self) -> Result<Farmer, PortalError> {
        let uid = self.session.require()?.uid;
        self.farmers
            .get_farmer(uid.clone())
            .await?
            .ok_or(PortalError::MissingProfile(uid))
    }

    /// Accepts a product photo, enforcing the configured size ceiling.
    pub fn capture_image(&self, content_type: &str, bytes: Vec<u8>) -> Result<CapturedImage, PortalError> {
        Ok(CapturedImage::with_limit(content_type, bytes, self.max_image_bytes)?)
    }

    /// Lists a product under the signed-in farmer's name and farm.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_listing(&self, draft: ListingDraft) -> Result<String, PortalError> {
        let farmer = self.profile().await?;
        let params = ListingCreate {
            origin: FarmOrigin {
                farmer_id: farmer.id,
                farmer_name: farmer.farmer_name,
                farm_name: farmer.farm_name,
                farm_location: farmer.location,
            },
            name: draft.name.trim().to_string(),
            quantity: draft.quantity,
            original_price: draft.price,
            grade: draft.grade,
            description: draft.description,
            image: draft.image,
            flash_sale: draft.flash_sale,
            created_at: Utc::now(),
        };
        Ok(self.listings.create_listing(params).await?)
    }

    pub async fn update_listing(&self, listing_id: &str, patch: ListingPatch) -> Result<Listing, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.listings.update_listing(&uid, listing_id.to_string(), patch).await?)
    }

    /// Takes a listing off the marketplace, or puts it back, without deleting it.
    #[instrument(skip(self))]
    pub async fn set_listing_active(&self, listing_id: &str, active: bool) -> Result<Listing, PortalError> {
        let status = if active { ListingStatus::Active } else { ListingStatus::Inactive };
        let patch = ListingPatch {
            status: Some(status),
            ..ListingPatch::default()
        };
        self.update_listing(listing_id, patch).await
    }

    pub async fn delete_listing(&self, listing_id: &str) -> Result<(), PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.listings.delete_listing(&uid, listing_id.to_string()).await?)
    }

    pub async fn my_listings(&self) -> Result<Vec<Listing>, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.listings.listings_for_farmer(&uid).await?)
    }

    /// The text to print as the listing's QR label. Freshly stamped on every call.
    pub async fn listing_qr(&self, listing_id: &str) -> Result<String, PortalError> {
        let uid = self.session.require()?.uid;
        let payload = self.listings.issue_provenance(listing_id.to_string()).await?;
        if payload.farmer_id != uid {
            return Err(ListingError::NotOwner {
                listing_id: listing_id.to_string(),
                farmer_id: uid,
            }
            .into());
        }
        Ok(payload.to_qr_string())
    }

    pub async fn incoming_orders(&self) -> Result<Vec<Order>, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.orders.orders_for_farmer(&uid).await?)
    }

    /// Pending orders not yet flagged ready for pickup.
    pub async fn awaiting_pickup_count(&self) -> Result<usize, PortalError> {
        let orders = self.incoming_orders().await?;
        Ok(orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending && !o.ready_for_pickup)
            .count())
    }

    pub async fn mark_ready(&self, order_id: &str) -> Result<Order, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.orders.mark_ready_for_pickup(order_id.to_string(), uid).await?)
    }

    /// Recomputes realized and pending earnings from the farmer's orders and
    /// stores them on the profile.
    #[instrument(skip(self))]
    pub async fn refresh_earnings(&self) -> Result<FarmerEarnings, PortalError> {
        let uid = self.session.require()?.uid;
        let orders = self.orders.orders_for_farmer(&uid).await?;
        let earnings = FarmerEarnings::summarize(&uid, &orders);
        self.farmers.record_earnings(uid, earnings).await?;
        info!(realized = earnings.realized, pending = earnings.pending, "Farmer earnings refreshed");
        Ok(earnings)
    }
}
