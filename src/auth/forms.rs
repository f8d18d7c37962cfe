//! Sign-up and sign-in forms. Each is validated field by field before any
//! call to the auth actor.

use crate::domain::{BusinessCreate, FarmerCreate, RiderCreate, VehicleType};
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .check("email", validation::email(&self.email))
            .check("password", validation::required("Password", &self.password));
        errors.into_result()
    }
}

fn credentials(errors: &mut FieldErrors, email: &str, password: &str, phone: &str) {
    errors
        .check("email", validation::email(email))
        .check("password", validation::password(password))
        .check("phone", validation::phone(phone));
}

#[derive(Debug, Clone)]
pub struct BusinessSignUp {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

impl BusinessSignUp {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .check("businessName", validation::required("Business name", &self.business_name))
            .check("ownerName", validation::required("Owner name", &self.owner_name));
        credentials(&mut errors, &self.email, &self.password, &self.phone);
        errors.check("address", validation::required("Address", &self.address));
        errors.into_result()
    }

    pub fn profile(&self) -> BusinessCreate {
        BusinessCreate {
            business_name: self.business_name.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            address: self.address.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FarmerSignUp {
    pub farmer_name: String,
    pub farm_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub location: String,
}

impl FarmerSignUp {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .check("farmerName", validation::required("Farmer name", &self.farmer_name))
            .check("farmName", validation::required("Farm name", &self.farm_name));
        credentials(&mut errors, &self.email, &self.password, &self.phone);
        errors.check("location", validation::required("Location", &self.location));
        errors.into_result()
    }

    pub fn profile(&self) -> FarmerCreate {
        FarmerCreate {
            farmer_name: self.farmer_name.trim().to_string(),
            farm_name: self.farm_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            location: self.location.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiderSignUp {
    pub rider_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
}

impl RiderSignUp {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("riderName", validation::required("Rider name", &self.rider_name));
        credentials(&mut errors, &self.email, &self.password, &self.phone);
        errors.check("vehicleNumber", validation::required("Vehicle number", &self.vehicle_number));
        errors.into_result()
    }

    pub fn profile(&self) -> RiderCreate {
        RiderCreate {
            rider_name: self.rider_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            vehicle_type: self.vehicle_type,
            vehicle_number: self.vehicle_number.trim().to_uppercase(),
        }
    }
}
