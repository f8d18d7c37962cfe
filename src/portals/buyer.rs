use chrono::Utc;
use tracing::{info, instrument};

use super::PortalError;
use crate::auth::{AuthClient, AuthError, BusinessSignUp, Role, SessionContext, SignInForm};
use crate::clients::{BusinessClient, Checkout, ListingClient, OrderClient};
use crate::domain::{Business, Cart, DeliveryContact, Grade, Listing, Order, PaymentMethod};
use crate::earnings::{CheckoutSummary, DeliveryFeeSchedule};
use crate::listing_actor::ListingError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    PriceLow,
    PriceHigh,
    /// Most stock first.
    Quantity,
    Name,
}

/// Marketplace search, filter and sort settings.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceQuery {
    /// Case-insensitive match on name, description or farm location.
    pub search: String,
    pub grade: Option<Grade>,
    pub max_price: Option<f64>,
    pub flash_sales_only: bool,
    pub sort: SortOrder,
}

impl MarketplaceQuery {
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        let needle = self.search.trim().to_lowercase();
        let now = Utc::now();
        let mut matched: Vec<Listing> = listings
            .into_iter()
            .filter(|l| {
                needle.is_empty()
                    || l.name.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
                    || l.origin.farm_location.to_lowercase().contains(&needle)
            })
            .filter(|l| self.grade.map_or(true, |grade| l.grade == grade))
            .filter(|l| self.max_price.map_or(true, |max| l.price <= max))
            .filter(|l| !self.flash_sales_only || l.flash_sale.is_some_and(|sale| sale.is_running(now)))
            .collect();

        match self.sort {
            SortOrder::PriceLow => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHigh => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Quantity => matched.sort_by(|a, b| b.quantity.total_cmp(&a.quantity)),
            SortOrder::Name => matched.sort_by_key(|l| l.name.to_lowercase()),
        }
        matched
    }
}

/// The business (buyer) portal: marketplace, cart, checkout and order tracking.
pub struct BuyerPortal {
    session: SessionContext,
    businesses: BusinessClient,
    listings: ListingClient,
    orders: OrderClient,
    fees: DeliveryFeeSchedule,
    cart: Cart,
}

impl BuyerPortal {
    pub fn new(
        auth: AuthClient,
        businesses: BusinessClient,
        listings: ListingClient,
        orders: OrderClient,
        fees: DeliveryFeeSchedule,
    ) -> Self {
        Self {
            session: SessionContext::new(auth, Role::Business),
            businesses,
            listings,
            orders,
            fees,
            cart: Cart::new(),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn register(&self, form: BusinessSignUp) -> Result<Business, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        let session = self.session.sign_up(&form.email, &form.password).await?;
        let business = self.businesses.register(session.uid, form.profile()).await?;
        info!(business_id = %business.id, "Business registered");
        Ok(business)
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn sign_in(&self, form: SignInForm) -> Result<Business, PortalError> {
        form.validate().map_err(AuthError::ValidationError)?;
        self.session.sign_in(&form.email, &form.password).await?;
        self.profile().await
    }

    pub fn sign_out(&mut self) {
        self.cart.clear();
        self.session.sign_out();
    }

    pub async fn profile(&self) -> Result<Business, PortalError> {
        let uid = self.session.require()?.uid;
        self.businesses
            .get_business(uid.clone())
            .await?
            .ok_or(PortalError::MissingProfile(uid))
    }

    pub async fn marketplace(&self, query: &MarketplaceQuery) -> Result<Vec<Listing>, PortalError> {
        let listings = self.listings.active_listings().await?;
        Ok(query.apply(listings))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds one kg of the listing as it currently stands in the store.
    pub async fn add_to_cart(&mut self, listing_id: &str) -> Result<(), PortalError> {
        let listing = self
            .listings
            .get_listing(listing_id.to_string())
            .await?
            .ok_or_else(|| ListingError::NotFound(listing_id.to_string()))?;
        self.cart.add(listing);
        Ok(())
    }

    pub fn set_cart_quantity(&mut self, listing_id: &str, quantity: f64) {
        self.cart.set_quantity(listing_id, quantity);
    }

    pub fn remove_from_cart(&mut self, listing_id: &str) {
        self.cart.remove(listing_id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::new(self.cart.sub_total(), self.fees.quote())
    }

    /// Places the cart as one order and empties the cart on success.
    #[instrument(skip(self, delivery))]
    pub async fn place_order(
        &mut self,
        delivery: DeliveryContact,
        payment_method: PaymentMethod,
    ) -> Result<String, PortalError> {
        let business = self.profile().await?;
        let checkout = Checkout {
            buyer_id: business.id,
            buyer_name: business.business_name,
            items: self.cart.order_lines(),
            delivery,
            payment_method,
        };
        let order_id = self.orders.place_order(checkout).await?;
        self.cart.clear();
        Ok(order_id)
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.orders.orders_for_buyer(&uid).await?)
    }

    /// Buyer's scan of the delivered produce.
    pub async fn confirm_delivery(&self, order_id: &str, raw_scan: &str) -> Result<Order, PortalError> {
        let uid = self.session.require()?.uid;
        Ok(self.orders.confirm_delivery(order_id.to_string(), uid, raw_scan).await?)
    }
}
