use std::convert::Infallible;

use super::actions::{FarmerAction, FarmerActionResult, RiderAction, RiderActionResult};
use super::error::ProfileError;
use crate::actor_framework::Entity;
use crate::domain::{Business, BusinessCreate, Farmer, FarmerCreate, Rider, RiderCreate};
use crate::validation::{self, FieldErrors};

fn check_contact(errors: &mut FieldErrors, email: &str, phone: &str) {
    errors
        .check("email", validation::email(email))
        .check("phone", validation::phone(phone));
}

impl Entity for Farmer {
    type Id = String;
    type CreateParams = FarmerCreate;
    type Patch = Infallible;
    type Action = FarmerAction;
    type ActionResult = FarmerActionResult;
    type Error = ProfileError;

    const COLLECTION: &'static str = "farmers";

    fn from_create_params(id: String, params: FarmerCreate) -> Result<Self, ProfileError> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, &params.email, &params.phone);
        errors
            .check("farmerName", validation::required("Farmer name", &params.farmer_name))
            .check("farmName", validation::required("Farm name", &params.farm_name));
        errors.into_result().map_err(ProfileError::ValidationError)?;

        Ok(Self {
            id,
            farmer_name: params.farmer_name,
            farm_name: params.farm_name,
            email: params.email,
            phone: params.phone,
            location: params.location,
            total_earnings: 0.0,
            pending_earnings: 0.0,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), ProfileError> {
        match patch {}
    }

    fn handle_action(&mut self, action: FarmerAction) -> Result<FarmerActionResult, ProfileError> {
        match action {
            FarmerAction::RecordEarnings(earnings) => {
                self.total_earnings = earnings.realized;
                self.pending_earnings = earnings.pending;
                Ok(FarmerActionResult::RecordEarnings(()))
            }
        }
    }
}

impl Entity for Business {
    type Id = String;
    type CreateParams = BusinessCreate;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = ();
    type Error = ProfileError;

    const COLLECTION: &'static str = "businesses";

    fn from_create_params(id: String, params: BusinessCreate) -> Result<Self, ProfileError> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, &params.email, &params.phone);
        errors
            .check("businessName", validation::required("Business name", &params.business_name))
            .check("ownerName", validation::required("Owner name", &params.owner_name))
            .check("address", validation::required("Address", &params.address));
        errors.into_result().map_err(ProfileError::ValidationError)?;

        Ok(Self {
            id,
            business_name: params.business_name,
            owner_name: params.owner_name,
            email: params.email,
            phone: params.phone,
            address: params.address,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), ProfileError> {
        match patch {}
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ProfileError> {
        Ok(())
    }
}

impl Entity for Rider {
    type Id = String;
    type CreateParams = RiderCreate;
    type Patch = Infallible;
    type Action = RiderAction;
    type ActionResult = RiderActionResult;
    type Error = ProfileError;

    const COLLECTION: &'static str = "riders";

    /// New riders start with an empty wallet.
    fn from_create_params(id: String, params: RiderCreate) -> Result<Self, ProfileError> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, &params.email, &params.phone);
        errors
            .check("riderName", validation::required("Rider name", &params.rider_name))
            .check("vehicleNumber", validation::required("Vehicle number", &params.vehicle_number));
        errors.into_result().map_err(ProfileError::ValidationError)?;

        Ok(Self {
            id,
            rider_name: params.rider_name,
            email: params.email,
            phone: params.phone,
            vehicle_type: params.vehicle_type,
            vehicle_number: params.vehicle_number,
            total_earnings: 0,
            total_deliveries: 0,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), ProfileError> {
        match patch {}
    }

    fn handle_action(&mut self, action: RiderAction) -> Result<RiderActionResult, ProfileError> {
        match action {
            RiderAction::CreditDelivery { amount } => {
                self.total_earnings += u64::from(amount);
                self.total_deliveries += 1;
                Ok(RiderActionResult::CreditDelivery {
                    total_earnings: self.total_earnings,
                    total_deliveries: self.total_deliveries,
                })
            }
        }
    }
}
