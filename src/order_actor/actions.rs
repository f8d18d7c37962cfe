use chrono::{DateTime, Utc};

use crate::domain::{DeliveryConfirmation, Order, PickupRecord, RiderAssignment};
use crate::media::CapturedImage;

/// Lifecycle transitions applied atomically to a single order document.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Farmer flags a pending order as packed. Advisory; status is unchanged.
    MarkReadyForPickup { farmer_id: String, at: DateTime<Utc> },
    /// Rider claims a pending order. Only succeeds while no rider is assigned.
    Accept { rider: RiderAssignment, at: DateTime<Utc> },
    /// Assigned rider passed pickup verification.
    CompletePickup { rider_id: String, record: PickupRecord },
    /// Assigned rider handed the order over.
    Deliver {
        rider_id: String,
        payment_proof: Option<CapturedImage>,
        at: DateTime<Utc>,
    },
    /// Buyer scanned the delivered produce.
    ConfirmDelivery {
        buyer_id: String,
        confirmation: DeliveryConfirmation,
    },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    MarkReadyForPickup(Order),
    Accept(Order),
    CompletePickup(Order),
    Deliver(Order),
    ConfirmDelivery(Order),
}

impl OrderActionResult {
    pub fn into_order(self) -> Order {
        match self {
            OrderActionResult::MarkReadyForPickup(order)
            | OrderActionResult::Accept(order)
            | OrderActionResult::CompletePickup(order)
            | OrderActionResult::Deliver(order)
            | OrderActionResult::ConfirmDelivery(order) => order,
        }
    }
}
