use super::error::ListingError;
use crate::actor_framework::Entity;
use crate::domain::{display_price, Listing, ListingCreate, ListingPatch, ListingStatus};
use crate::validation::{self, FieldErrors};

impl Entity for Listing {
    type Id = String;
    type CreateParams = ListingCreate;
    type Patch = ListingPatch;
    type Action = ();
    type ActionResult = ();
    type Error = ListingError;

    const COLLECTION: &'static str = "listings";

    /// Creates an active listing. The display price is derived from the
    /// original price and any flash-sale discount.
    fn from_create_params(id: String, params: ListingCreate) -> Result<Self, ListingError> {
        let mut errors = FieldErrors::new();
        errors
            .check("name", validation::required("Product name", &params.name))
            .check("quantity", validation::positive("Quantity", params.quantity))
            .check("price", validation::positive("Price", params.original_price));
        if let Some(sale) = &params.flash_sale {
            let discount = sale.discount_percent;
            if !(discount.is_finite() && discount > 0.0 && discount < 100.0) {
                errors.check(
                    "flashSaleDiscount",
                    Err("Discount must be between 0 and 100 percent".to_string()),
                );
            }
            if sale.ends_at <= params.created_at {
                errors.check(
                    "flashSaleEndTime",
                    Err("Flash sale must end in the future".to_string()),
                );
            }
        }
        errors.into_result().map_err(ListingError::ValidationError)?;

        Ok(Self {
            id,
            price: display_price(params.original_price, params.flash_sale.as_ref()),
            origin: params.origin,
            name: params.name,
            quantity: params.quantity,
            original_price: params.original_price,
            grade: params.grade,
            description: params.description,
            image: params.image,
            flash_sale: params.flash_sale,
            status: ListingStatus::Active,
            created_at: params.created_at,
        })
    }

    /// Updates quantity, price or status. A sold-out listing (quantity 0) stays listed.
    fn on_update(&mut self, patch: ListingPatch) -> Result<(), ListingError> {
        let mut errors = FieldErrors::new();
        if let Some(quantity) = patch.quantity {
            if !(quantity.is_finite() && quantity >= 0.0) {
                errors.check("quantity", Err("Quantity cannot be negative".to_string()));
            }
        }
        if let Some(price) = patch.price {
            errors.check("price", validation::positive("Price", price));
        }
        errors.into_result().map_err(ListingError::ValidationError)?;

        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.original_price = price;
            self.price = display_price(price, self.flash_sale.as_ref());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ListingError> {
        Ok(())
    }
}
