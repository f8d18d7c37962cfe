use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::{Grade, Listing};
use crate::media::CapturedImage;
use crate::provenance::ProvenancePayload;

/// Order lifecycle. Orders only ever move one step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Accepted,
    Picked,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Picked => "picked",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Accepted),
            OrderStatus::Accepted => Some(OrderStatus::Picked),
            OrderStatus::Picked => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn can_advance_to(self, to: OrderStatus) -> bool {
        self.next() == Some(to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Online,
    Cod,
}

impl PaymentMethod {
    pub fn is_cash_on_delivery(self) -> bool {
        matches!(self, PaymentMethod::Cod)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(PaymentMethod::Online),
            "cod" | "pay_on_delivery" => Ok(PaymentMethod::Cod),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// A listing copied by value into an order at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub listing_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub farmer_id: String,
    pub grade: Grade,
}

impl LineItem {
    /// Snapshot of the stored listing at checkout. Only the quantity comes
    /// from the buyer.
    pub fn from_listing(listing: &Listing, quantity: f64) -> Self {
        Self {
            listing_id: listing.id.clone(),
            name: listing.name.clone(),
            unit_price: listing.price,
            quantity,
            farmer_id: listing.origin.farmer_id.clone(),
            grade: listing.grade,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity
    }
}

/// What a buyer asks for at checkout: a listing and a quantity in kg.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub listing_id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryContact {
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiderAssignment {
    pub rider_id: String,
    pub rider_name: String,
    pub rider_phone: String,
}

/// Attached to an order when the rider's pickup verification passes.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupRecord {
    pub verification_id: String,
    pub photos: Vec<CapturedImage>,
    pub notes: String,
    pub verified_at: DateTime<Utc>,
}

/// Attached to an order when the buyer scans the delivered produce.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryConfirmation {
    pub scanned: ProvenancePayload,
    pub confirmed_at: DateTime<Utc>,
}

/// Represents a buyer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub items: Vec<LineItem>,
    pub total_items: f64,
    pub sub_total: f64,
    pub delivery_fee: u32,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery: DeliveryContact,
    pub status: OrderStatus,
    pub ready_for_pickup: bool,
    pub rider: Option<RiderAssignment>,
    pub farm_address: Option<String>,
    pub farm_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub ready_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub pickup: Option<PickupRecord>,
    pub payment_proof: Option<CapturedImage>,
    pub delivery_confirmation: Option<DeliveryConfirmation>,
}

impl Order {
    pub fn rider_id(&self) -> Option<&str> {
        self.rider.as_ref().map(|r| r.rider_id.as_str())
    }

    pub fn verification_completed(&self) -> bool {
        self.pickup.is_some()
    }

    pub fn delivery_verified(&self) -> bool {
        self.delivery_confirmation.is_some()
    }

    pub fn involves_farmer(&self, farmer_id: &str) -> bool {
        self.items.iter().any(|item| item.farmer_id == farmer_id)
    }

    /// Gross value of one farmer's line items within this order.
    pub fn farmer_subtotal(&self, farmer_id: &str) -> f64 {
        self.items
            .iter()
            .filter(|item| item.farmer_id == farmer_id)
            .map(LineItem::subtotal)
            .sum()
    }
}

/// Payload for creating a new order. Totals are derived from the items and
/// fee when the document is built.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: String,
    pub buyer_name: String,
    pub items: Vec<LineItem>,
    pub delivery_fee: u32,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryContact,
    pub farm_address: Option<String>,
    pub farm_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
