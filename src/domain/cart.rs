use crate::domain::{Listing, OrderLine};

/// One cart row: the listing as seen when it was added, plus the chosen kg.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub listing: Listing,
    pub quantity: f64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.listing.price * self.quantity
    }
}

/// Buyer-local cart. Lives only in the buyer session and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one kg of the listing, or one more kg if it is already in the cart.
    /// The chosen quantity never exceeds what the listing has available.
    pub fn add(&mut self, listing: Listing) {
        match self.lines.iter_mut().find(|line| line.listing.id == listing.id) {
            Some(line) => line.quantity = (line.quantity + 1.0).min(line.listing.quantity),
            None => {
                let quantity = listing.quantity.min(1.0);
                if quantity > 0.0 {
                    self.lines.push(CartLine { listing, quantity });
                }
            }
        }
    }

    /// Sets the chosen quantity, clamped to availability. Zero or less removes the line.
    pub fn set_quantity(&mut self, listing_id: &str, quantity: f64) {
        if quantity <= 0.0 {
            self.remove(listing_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.listing.id == listing_id) {
            line.quantity = quantity.min(line.listing.quantity);
        }
    }

    pub fn remove(&mut self, listing_id: &str) {
        self.lines.retain(|line| line.listing.id != listing_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn sub_total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn total_items(&self) -> f64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// The cart as checkout lines. Prices are not carried; the order is
    /// priced from the stored listings.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine {
                listing_id: line.listing.id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FarmOrigin, Grade, ListingStatus};
    use chrono::Utc;

    fn listing(id: &str, price: f64, quantity: f64) -> Listing {
        Listing {
            id: id.to_string(),
            origin: FarmOrigin {
                farmer_id: "farmer_1".to_string(),
                ..FarmOrigin::default()
            },
            name: format!("Produce {}", id),
            quantity,
            price,
            original_price: price,
            grade: Grade::B,
            description: String::new(),
            image: None,
            flash_sale: None,
            status: ListingStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_subtotal_for_two_items() {
        let mut cart = Cart::new();
        cart.add(listing("a", 20.0, 50.0));
        cart.add(listing("b", 50.0, 10.0));
        cart.set_quantity("a", 3.0);

        assert_eq!(cart.sub_total(), 110.0);
        assert_eq!(cart.total_items(), 4.0);
        assert_eq!(cart.lines()[0].subtotal(), 60.0);
        assert_eq!(
            cart.order_lines(),
            vec![
                OrderLine {
                    listing_id: "a".to_string(),
                    quantity: 3.0
                },
                OrderLine {
                    listing_id: "b".to_string(),
                    quantity: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_quantity_is_clamped_to_availability() {
        let mut cart = Cart::new();
        let scarce = listing("a", 10.0, 2.5);
        cart.add(scarce.clone());
        cart.add(scarce.clone());
        cart.add(scarce);
        assert_eq!(cart.lines()[0].quantity, 2.5);

        cart.set_quantity("a", 100.0);
        assert_eq!(cart.lines()[0].quantity, 2.5);
    }

    #[test]
    fn test_zero_quantity_removes_and_clear_empties() {
        let mut cart = Cart::new();
        cart.add(listing("a", 10.0, 5.0));
        cart.add(listing("b", 10.0, 5.0));
        cart.set_quantity("a", 0.0);
        assert_eq!(cart.lines().len(), 1);

        cart.clear();
        assert!(cart.is_empty());

        cart.add(listing("sold_out", 10.0, 0.0));
        assert!(cart.is_empty());
    }
}
