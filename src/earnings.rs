//! Payout arithmetic: delivery fee quote, rider and farmer 90/10 splits.

use crate::domain::{Order, OrderStatus};

/// Share of a gross amount paid to the rider or farmer, in percent.
pub const EARNER_SHARE_PERCENT: u32 = 90;
/// Share kept by the platform, in percent. Displayed only.
pub const PLATFORM_SHARE_PERCENT: u32 = 100 - EARNER_SHARE_PERCENT;

pub const DEFAULT_RATE_PER_KM: f64 = 8.0;
pub const DEFAULT_ESTIMATED_DISTANCE_KM: f64 = 12.5;

/// Flat per-km delivery pricing against a fixed distance estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryFeeSchedule {
    pub rate_per_km: f64,
    pub estimated_distance_km: f64,
}

impl Default for DeliveryFeeSchedule {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_RATE_PER_KM,
            estimated_distance_km: DEFAULT_ESTIMATED_DISTANCE_KM,
        }
    }
}

impl DeliveryFeeSchedule {
    pub fn quote(&self) -> u32 {
        delivery_fee(self.estimated_distance_km, self.rate_per_km)
    }
}

/// `ceil(distance × rate)`, floored at zero.
pub fn delivery_fee(distance_km: f64, rate_per_km: f64) -> u32 {
    let fee = (distance_km * rate_per_km).ceil();
    if fee.is_finite() && fee > 0.0 {
        fee as u32
    } else {
        0
    }
}

/// Rider payout for one delivery: `floor(fee × 0.90)`.
pub fn rider_earning(delivery_fee: u32) -> u32 {
    (u64::from(delivery_fee) * u64::from(EARNER_SHARE_PERCENT) / 100) as u32
}

/// Farmer payout on a gross line-item amount.
pub fn farmer_earning(gross: f64) -> f64 {
    gross * f64::from(EARNER_SHARE_PERCENT) / 100.0
}

pub fn platform_fee(gross: f64) -> f64 {
    gross * f64::from(PLATFORM_SHARE_PERCENT) / 100.0
}

/// Totals shown on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSummary {
    pub sub_total: f64,
    pub delivery_fee: u32,
    pub total: f64,
}

impl CheckoutSummary {
    pub fn new(sub_total: f64, delivery_fee: u32) -> Self {
        Self {
            sub_total,
            delivery_fee,
            total: sub_total + f64::from(delivery_fee),
        }
    }
}

/// A farmer's earnings across orders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FarmerEarnings {
    /// From delivered orders.
    pub realized: f64,
    /// From orders still pending or picked up.
    pub pending: f64,
}

impl FarmerEarnings {
    /// Accepted orders fall in neither bucket until they are picked up.
    pub fn summarize<'a>(farmer_id: &str, orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut acc, order| {
            let earning = farmer_earning(order.farmer_subtotal(farmer_id));
            match order.status {
                OrderStatus::Delivered => acc.realized += earning,
                OrderStatus::Pending | OrderStatus::Picked => acc.pending += earning,
                OrderStatus::Accepted => {}
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeliveryContact, Grade, LineItem, PaymentMethod, PaymentStatus};
    use chrono::Utc;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn order(status: OrderStatus, items: &[(&str, f64, f64)]) -> Order {
        Order {
            id: "order".to_string(),
            buyer_id: "buyer".to_string(),
            buyer_name: "Buyer".to_string(),
            items: items
                .iter()
                .map(|(farmer, price, qty)| LineItem {
                    listing_id: "l".to_string(),
                    name: "x".to_string(),
                    unit_price: *price,
                    quantity: *qty,
                    farmer_id: farmer.to_string(),
                    grade: Grade::B,
                })
                .collect(),
            total_items: 0.0,
            sub_total: 0.0,
            delivery_fee: 0,
            total_amount: 0.0,
            payment_method: PaymentMethod::Online,
            payment_status: PaymentStatus::Paid,
            delivery: DeliveryContact {
                address: String::new(),
                phone: String::new(),
            },
            status,
            ready_for_pickup: false,
            rider: None,
            farm_address: None,
            farm_phone: None,
            created_at: Utc::now(),
            accepted_at: None,
            ready_at: None,
            delivered_at: None,
            pickup: None,
            payment_proof: None,
            delivery_confirmation: None,
        }
    }

    #[test]
    fn test_rider_earning_floors_ninety_percent() {
        assert_eq!(rider_earning(150), 135);
        assert_eq!(rider_earning(100), 90);
        assert_eq!(rider_earning(99), 89);
        assert_eq!(rider_earning(0), 0);
    }

    #[test]
    fn test_delivery_fee_ceils_distance_times_rate() {
        assert_eq!(delivery_fee(12.5, 8.0), 100);
        assert_eq!(delivery_fee(12.3, 8.0), 99);
        assert_eq!(delivery_fee(-1.0, 8.0), 0);
        assert_eq!(DeliveryFeeSchedule::default().quote(), 100);
    }

    #[test]
    fn test_checkout_summary() {
        let summary = CheckoutSummary::new(110.0, 100);
        assert_eq!(summary.total, 210.0);
    }

    #[test]
    fn test_farmer_split_and_platform_fee() {
        assert!(approx(farmer_earning(200.0), 180.0));
        assert!(approx(platform_fee(200.0), 20.0));
    }

    #[test]
    fn test_farmer_earnings_buckets() {
        let orders = vec![
            order(OrderStatus::Delivered, &[("f1", 100.0, 2.0), ("f2", 10.0, 1.0)]),
            order(OrderStatus::Pending, &[("f1", 10.0, 1.0)]),
            order(OrderStatus::Picked, &[("f1", 20.0, 1.0)]),
            order(OrderStatus::Accepted, &[("f1", 1000.0, 1.0)]),
        ];

        let earnings = FarmerEarnings::summarize("f1", &orders);
        assert!(approx(earnings.realized, 180.0));
        assert!(approx(earnings.pending, 27.0));

        let other = FarmerEarnings::summarize("f2", &orders);
        assert!(approx(other.realized, 9.0));
        assert!(approx(other.pending, 0.0));
    }
}
