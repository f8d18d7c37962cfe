use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::{ListingClient, RiderClient, VerificationClient};
use crate::domain::{
    DeliveryConfirmation, DeliveryContact, LineItem, ListingStatus, Order, OrderCreate, OrderLine, OrderStatus,
    PaymentMethod, PickupRecord, RiderAssignment, VerificationCreate,
};
use crate::earnings::{rider_earning, DeliveryFeeSchedule};
use crate::flows::{read_buyer_scan, PickupSubmission};
use crate::media::CapturedImage;
use crate::order_actor::{OrderAction, OrderError};
use crate::validation::{self, FieldErrors};

/// A buyer's checkout request. Only listing ids and quantities come from
/// the buyer; prices, farmers and the delivery fee are filled in here.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub buyer_id: String,
    pub buyer_name: String,
    pub items: Vec<OrderLine>,
    pub delivery: DeliveryContact,
    pub payment_method: PaymentMethod,
}

/// Outcome of a completed delivery, as shown to the rider.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub order: Order,
    pub earning: u32,
    pub total_earnings: u64,
    pub total_deliveries: u32,
}

/// Client for interacting with the Order actor.
///
/// Lifecycle steps that span collections (checkout, pickup verification,
/// delivery payout) are orchestrated here as a sequence of single-document
/// operations. Each order transition is re-checked inside the order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    listing_client: ListingClient,
    verification_client: VerificationClient,
    rider_client: RiderClient,
    fees: DeliveryFeeSchedule,
}

crate::impl_client_methods!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        listing_client: ListingClient,
        verification_client: VerificationClient,
        rider_client: RiderClient,
        fees: DeliveryFeeSchedule,
    ) -> Self {
        Self {
            inner,
            listing_client,
            verification_client,
            rider_client,
            fees,
        }
    }

    #[instrument(skip(self, checkout), fields(buyer_id = %checkout.buyer_id))]
    pub async fn place_order(&self, checkout: Checkout) -> Result<String, OrderError> {
        info!("Processing place_order request (Client Side)");

        // Step 1: Validate delivery contact
        let mut errors = FieldErrors::new();
        errors
            .check("address", validation::required("Address", &checkout.delivery.address))
            .check("phone", validation::phone(&checkout.delivery.phone));
        errors.into_result().map_err(OrderError::ValidationError)?;

        if checkout.items.is_empty() {
            warn!("Checkout with an empty cart");
            return Err(OrderError::EmptyCart);
        }

        // Step 2: Price every line from the stored listing
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(checkout.items.len());
        let mut farm_address = None;
        for line in &checkout.items {
            if !seen.insert(line.listing_id.as_str()) || !(line.quantity.is_finite() && line.quantity > 0.0) {
                warn!(listing_id = %line.listing_id, "Rejected checkout line");
                return Err(OrderError::InvalidLineItem(line.listing_id.clone()));
            }
            let listing = match self.listing_client.get_listing(line.listing_id.clone()).await {
                Ok(Some(listing)) if listing.status == ListingStatus::Active => listing,
                Ok(_) => {
                    error!(listing_id = %line.listing_id, "Listing not found or inactive");
                    return Err(OrderError::InvalidListing(line.listing_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Listing validation failed");
                    return Err(OrderError::InvalidListing(format!("Listing validation failed: {}", e)));
                }
            };
            if line.quantity > listing.quantity {
                warn!(listing_id = %listing.id, requested = line.quantity, available = listing.quantity, "Not enough stock");
                return Err(OrderError::InsufficientStock {
                    listing_id: listing.id,
                    requested: line.quantity,
                    available: listing.quantity,
                });
            }
            debug!(listing_id = %listing.id, "Listing validation successful");
            farm_address.get_or_insert_with(|| listing.origin.farm_location.clone());
            items.push(LineItem::from_listing(&listing, line.quantity));
        }

        // Step 3: Create order in ResourceActor
        let payload = OrderCreate {
            buyer_id: checkout.buyer_id,
            buyer_name: checkout.buyer_name,
            items,
            delivery_fee: self.fees.quote(),
            payment_method: checkout.payment_method,
            delivery: checkout.delivery,
            farm_address,
            farm_phone: None,
            created_at: Utc::now(),
        };
        let id = self.inner.create(payload).await?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Claims a pending order for the rider. Without `confirmed` nothing is sent.
    #[instrument(skip(self, rider), fields(rider_id = %rider.rider_id))]
    pub async fn accept_order(&self, id: String, rider: RiderAssignment, confirmed: bool) -> Result<Order, OrderError> {
        if !confirmed {
            return Err(OrderError::NotConfirmed);
        }
        debug!("Sending request");
        let order = self
            .inner
            .perform_action(id, OrderAction::Accept { rider, at: Utc::now() })
            .await?
            .into_order();
        info!(order_id = %order.id, "Order accepted");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn mark_ready_for_pickup(&self, id: String, farmer_id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .perform_action(id, OrderAction::MarkReadyForPickup { farmer_id, at: Utc::now() })
            .await?
            .into_order();
        info!(order_id = %order.id, "Order ready for pickup");
        Ok(order)
    }

    /// Moves the order to `picked` and records the pickup verification.
    ///
    /// Every check runs before anything is written, so a rejected pickup
    /// leaves no trace in either collection. The order is tagged first under
    /// a pre-allocated record id; the store admits one pickup per order, so
    /// of two racing submissions only the winner writes a record.
    #[instrument(skip(self, submission))]
    pub async fn verify_pickup(
        &self,
        id: String,
        rider_id: String,
        rider_name: String,
        submission: PickupSubmission,
    ) -> Result<Order, OrderError> {
        info!("Processing verify_pickup request");

        // Step 1: The scanned product must be a real listing
        let listing_id = submission.scanned.id.clone();
        match self.listing_client.get_listing(listing_id.clone()).await {
            Ok(Some(_)) => debug!(listing_id = %listing_id, "Scanned listing found"),
            Ok(None) => {
                warn!(listing_id = %listing_id, "Scanned listing does not exist");
                return Err(OrderError::UnknownListing(listing_id));
            }
            Err(e) => return Err(OrderError::ActorCommunicationError(e.to_string())),
        }

        // Step 2: The order must be accepted by this rider
        let order = self.inner.get(id.clone()).await?.ok_or_else(|| OrderError::NotFound(id.clone()))?;
        if order.rider_id() != Some(rider_id.as_str()) {
            return Err(OrderError::NotAssignedRider(rider_id));
        }
        if order.verification_completed() {
            return Err(OrderError::AlreadyVerified);
        }
        if order.status != OrderStatus::Accepted {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Picked,
            });
        }

        // Step 3: Build the record and check it before any write
        let verified_at = Utc::now();
        let verification_id = self.verification_client.allocate_id();
        let params = VerificationCreate {
            order_id: id.clone(),
            rider_id: rider_id.clone(),
            rider_name,
            scanned_product: submission.scanned,
            checklist: submission.checklist,
            photos: submission.photos.clone(),
            notes: submission.notes.clone(),
            timestamp: verified_at,
        };
        params.check_complete()?;

        // Step 4: Tag the order. A concurrent submission fails here.
        let record = PickupRecord {
            verification_id: verification_id.clone(),
            photos: submission.photos,
            notes: submission.notes,
            verified_at,
        };
        let order = self
            .inner
            .perform_action(id, OrderAction::CompletePickup { rider_id, record })
            .await?
            .into_order();

        // Step 5: Write the record the order now points at
        if let Err(e) = self.verification_client.record_as(verification_id.clone(), params).await {
            error!(order_id = %order.id, verification_id = %verification_id, error = %e, "Verification record not written");
            return Err(e.into());
        }
        info!(order_id = %order.id, verification_id = %verification_id, "Pickup verified");
        Ok(order)
    }

    /// Marks the order delivered, then credits the rider wallet once.
    #[instrument(skip(self, payment_proof))]
    pub async fn complete_delivery(
        &self,
        id: String,
        rider_id: String,
        payment_proof: Option<CapturedImage>,
    ) -> Result<DeliveryReceipt, OrderError> {
        info!("Processing complete_delivery request");
        let order = self
            .inner
            .perform_action(
                id,
                OrderAction::Deliver {
                    rider_id: rider_id.clone(),
                    payment_proof,
                    at: Utc::now(),
                },
            )
            .await?
            .into_order();

        // `Deliver` succeeds at most once per order, so this credit does too.
        let earning = rider_earning(order.delivery_fee);
        let (total_earnings, total_deliveries) = self.rider_client.credit_delivery(rider_id, earning).await?;
        info!(order_id = %order.id, earning, "Order delivered");
        Ok(DeliveryReceipt {
            order,
            earning,
            total_earnings,
            total_deliveries,
        })
    }

    /// Buyer's receipt scan. Independent of the rider's delivery step.
    #[instrument(skip(self, raw_scan))]
    pub async fn confirm_delivery(&self, id: String, buyer_id: String, raw_scan: &str) -> Result<Order, OrderError> {
        let scanned = read_buyer_scan(&id, raw_scan)?;
        debug!("Sending request");
        let confirmation = DeliveryConfirmation {
            scanned,
            confirmed_at: Utc::now(),
        };
        let order = self
            .inner
            .perform_action(id, OrderAction::ConfirmDelivery { buyer_id, confirmation })
            .await?
            .into_order();
        info!(order_id = %order.id, "Delivery confirmed by buyer");
        Ok(order)
    }

    /// A buyer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let buyer_id = buyer_id.to_string();
        let orders = self.inner.query(move |o: &Order| o.buyer_id == buyer_id).await?;
        Ok(newest_first(orders))
    }

    /// Orders containing at least one of the farmer's items, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_farmer(&self, farmer_id: &str) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let farmer_id = farmer_id.to_string();
        let orders = self.inner.query(move |o: &Order| o.involves_farmer(&farmer_id)).await?;
        Ok(newest_first(orders))
    }

    /// The rider's view of one status tab. Pending shows every open order;
    /// later statuses show only the rider's own.
    #[instrument(skip(self))]
    pub async fn orders_for_rider(&self, rider_id: &str, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let rider_id = rider_id.to_string();
        let orders = self
            .inner
            .query(move |o: &Order| {
                o.status == status && (status == OrderStatus::Pending || o.rider_id() == Some(rider_id.as_str()))
            })
            .await?;
        Ok(newest_first(orders))
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}
