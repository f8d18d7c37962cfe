//! Per-role profile documents, keyed by the auth uid.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Farmer {
    pub id: String,
    pub farmer_name: String,
    pub farm_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub total_earnings: f64,
    pub pending_earnings: f64,
}

#[derive(Debug, Clone)]
pub struct FarmerCreate {
    pub farmer_name: String,
    pub farm_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub id: String,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct BusinessCreate {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Bike,
    Scooter,
    Bicycle,
    Van,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::Bike => "bike",
            VehicleType::Scooter => "scooter",
            VehicleType::Bicycle => "bicycle",
            VehicleType::Van => "van",
        };
        f.write_str(name)
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(VehicleType::Bike),
            "scooter" => Ok(VehicleType::Scooter),
            "bicycle" => Ok(VehicleType::Bicycle),
            "van" => Ok(VehicleType::Van),
            other => Err(format!("unknown vehicle type: {}", other)),
        }
    }
}

/// Rider profile. The wallet fields only change through atomic increments.
#[derive(Debug, Clone, PartialEq)]
pub struct Rider {
    pub id: String,
    pub rider_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
    pub total_earnings: u64,
    pub total_deliveries: u32,
}

#[derive(Debug, Clone)]
pub struct RiderCreate {
    pub rider_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
}
