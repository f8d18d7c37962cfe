use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::media::CapturedImage;

/// Quality classification of imperfect produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    B,
    C,
}

impl Grade {
    /// Savings hint shown on the marketplace card.
    pub fn savings_hint(self) -> &'static str {
        match self {
            Grade::B => "40-50%",
            Grade::C => "50-60%",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::B => f.write_str("B"),
            Grade::C => f.write_str("C"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Inactive,
}

/// Time-boxed discount. Holding both fields in one value keeps a flash sale
/// from ever existing without its discount or expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashSale {
    pub discount_percent: f64,
    pub ends_at: DateTime<Utc>,
}

impl FlashSale {
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        now < self.ends_at
    }
}

/// Farmer and farm fields cached on each listing at creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FarmOrigin {
    pub farmer_id: String,
    pub farmer_name: String,
    pub farm_name: String,
    pub farm_location: String,
}

/// A produce listing offered by a farmer.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub origin: FarmOrigin,
    pub name: String,
    /// Available quantity in kg.
    pub quantity: f64,
    /// Price per kg as displayed, after any flash-sale discount.
    pub price: f64,
    pub original_price: f64,
    pub grade: Grade,
    pub description: String,
    pub image: Option<CapturedImage>,
    pub flash_sale: Option<FlashSale>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn farmer_id(&self) -> &str {
        &self.origin.farmer_id
    }

    pub fn is_flash_sale(&self) -> bool {
        self.flash_sale.is_some()
    }

    pub fn savings_hint(&self) -> &'static str {
        self.grade.savings_hint()
    }
}

/// Display price for a listing: `original × (1 − discount/100)` on flash sale.
pub fn display_price(original_price: f64, flash_sale: Option<&FlashSale>) -> f64 {
    match flash_sale {
        Some(sale) => original_price * (1.0 - sale.discount_percent / 100.0),
        None => original_price,
    }
}

/// Payload for creating a new listing.
#[derive(Debug, Clone)]
pub struct ListingCreate {
    pub origin: FarmOrigin,
    pub name: String,
    pub quantity: f64,
    pub original_price: f64,
    pub grade: Grade,
    pub description: String,
    pub image: Option<CapturedImage>,
    pub flash_sale: Option<FlashSale>,
    pub created_at: DateTime<Utc>,
}

/// Farmer-side edits to a listing. `price` replaces the original price; the
/// display price is recomputed from it.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    /// Inactive listings drop out of the marketplace and cannot be ordered.
    pub status: Option<ListingStatus>,
}
