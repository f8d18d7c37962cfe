use tracing::{info, instrument};

use super::PortalError;
use crate::auth::{AuthClient, AuthError, RiderSignUp, Role, SessionContext, SignInForm};
use crate::clients::{DeliveryReceipt, OrderClient, RiderClient};
use crate::domain::{Order, OrderStatus, Rider, RiderAssignment};
use crate::flows::{DeliveryHandoff, PickupSession};
use crate::media::CapturedImage;
use crate::order_actor::OrderError;

/// The rider (delivery) portal: order tabs, accept, pickup verification,
/// hand-over and wallet.
pub struct RiderPortal {
    session: SessionContext,
    riders: RiderClient,
    orders: OrderClient,
    max_image_bytes: usize,
}

impl RiderPortal {
    pub fn new(auth: AuthClient, riders: RiderClient, orders: OrderClient, max_image_bytes: usize) -> Self {
        Self {
            session: SessionContext::new(auth, Role::Rider),
            riders,
            orders,
            max_image_bytes,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn register(&self, form: RiderSignUp) -> Result<Rider, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        let session = self.session.sign_up(&form.email, &form.password).await?;
        let rider = self.riders.register(session.uid, form.profile()).await?;
        info!(rider_id = %rider.id, "Rider registered");
        Ok(rider)
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn sign_in(&self, form: SignInForm) -> Result<Rider, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        self.session.sign_in(&form.email, &form.password).await?;
        self.wallet().await
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    /// The rider profile, including wallet totals.
    pub async fn wallet(&self) -> Result<Rider, PortalError> {
        let uid = self.session.require()?.uid;
        self.riders
            .get_rider(uid.clone())
            .await?
            .ok_or(PortalError::MissingProfile(uid))
    }

    pub fn capture_image(&self, content_type: &str, bytes: Vec<u8>) -> Result<CapturedImage, PortalError> {
        Ok(CapturedImage::with_limit(content_type, bytes, self.max_image_bytes)?)
    }

    /// One status tab. `Pending` lists every open order; the others list only this rider's.
    pub async fn orders(&self, status: OrderStatus) -> Result<Vec<Order>, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.orders.orders_for_rider(&uid, status).await?)
    }

    /// Accepting needs the rider's explicit confirmation.
    #[instrument(skip(self))]
    pub async fn accept(&self, order_id: &str, confirmed: bool) -> Result<Order, PortalError> {
        let rider = self.wallet().await?;
        let assignment = RiderAssignment {
            rider_id: rider.id,
            rider_name: rider.rider_name,
            rider_phone: rider.phone,
        };
        Ok(self.orders.accept_order(order_id.to_string(), assignment, confirmed).await?)
    }

    pub fn begin_pickup(&self, order_id: &str) -> PickupSession {
        PickupSession::new(order_id)
    }

    #[instrument(skip(self, pickup), fields(order_id = %pickup.order_id()))]
    pub async fn verify_pickup(&self, pickup: &PickupSession) -> Result<Order, PortalError> {
        let submission = pickup.ready()?;
        let rider = self.wallet().await?;
        Ok(self
            .orders
            .verify_pickup(pickup.order_id().to_string(), rider.id, rider.rider_name, submission)
            .await?)
    }

    /// Opens the hand-over screen for one of this rider's picked-up orders.
    pub async fn begin_delivery(&self, order_id: &str) -> Result<DeliveryHandoff, PortalError> {
        let uid = self.session.require()?.uid;
        let order = self
            .orders
            .get_order(order_id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        if order.rider_id() != Some(uid.as_str()) {
            return Err(OrderError::NotAssignedRider(uid).into());
        }
        if order.status != OrderStatus::Picked {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Delivered,
            }
            .into());
        }
        Ok(DeliveryHandoff::new(order))
    }

    #[instrument(skip(self, handoff), fields(order_id = %handoff.order().id))]
    pub async fn finish_delivery(&self, handoff: DeliveryHandoff) -> Result<DeliveryReceipt, PortalError> {
        let uid = self.session.require()?.uid;
        let (order_id, proof) = handoff.finish()?;
        Ok(self.orders.complete_delivery(order_id, uid, proof).await?)
    }
}
