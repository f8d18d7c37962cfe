use crate::earnings::FarmerEarnings;

/// Atomic wallet operations on a rider profile.
#[derive(Debug, Clone)]
pub enum RiderAction {
    /// Add one delivery's payout and bump the delivery count, in one write.
    CreditDelivery { amount: u32 },
}

/// Results from RiderActions - variants match 1:1 with RiderAction
#[derive(Debug, Clone)]
pub enum RiderActionResult {
    /// Wallet totals after the credit.
    CreditDelivery { total_earnings: u64, total_deliveries: u32 },
}

#[derive(Debug, Clone)]
pub enum FarmerAction {
    /// Overwrite the dashboard earnings totals.
    RecordEarnings(FarmerEarnings),
}

#[derive(Debug, Clone)]
pub enum FarmerActionResult {
    RecordEarnings(()),
}
