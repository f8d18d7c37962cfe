mod actor_framework;
mod app_system;
mod auth;
mod clients;
mod config;
mod domain;
mod earnings;
mod flows;
mod listing_actor;
mod media;
mod order_actor;
mod portals;
mod profile_actor;
mod provenance;
mod validation;
mod verification_actor;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, MarketSystem};
use crate::auth::{BusinessSignUp, FarmerSignUp, RiderSignUp};
use crate::config::AppConfig;
use crate::domain::{ChecklistItem, DeliveryContact, Grade, OrderStatus, PaymentMethod, VehicleType};
use crate::order_actor::OrderError;
use crate::portals::{ListingDraft, MarketplaceQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    setup_tracing(&config.log_filter)?;

    info!("Starting marketplace with all stores");
    let system = MarketSystem::new(config);

    let farmer = system.farmer_portal();
    let mut buyer = system.buyer_portal();
    let rider = system.rider_portal();

    // Farmer lists surplus produce
    let listing_id = async {
        farmer
            .register(FarmerSignUp {
                farmer_name: "Ramesh Patil".to_string(),
                farm_name: "Green Acres".to_string(),
                email: "ramesh@khetflow.in".to_string(),
                password: "sabzi123".to_string(),
                phone: "9123456780".to_string(),
                location: "Nashik".to_string(),
            })
            .await?;
        farmer
            .add_listing(ListingDraft {
                name: "Tomatoes".to_string(),
                quantity: 50.0,
                price: 20.0,
                grade: Grade::B,
                description: "Uneven size, fully ripe".to_string(),
                image: None,
                flash_sale: None,
            })
            .await
    }
    .instrument(tracing::info_span!("farmer_listing"))
    .await?;
    info!(listing_id = %listing_id, "Listing published");

    // Buyer orders from the marketplace
    let order_id = async {
        buyer
            .register(BusinessSignUp {
                business_name: "Hotel Saffron".to_string(),
                owner_name: "Anita Rao".to_string(),
                email: "anita@saffron.in".to_string(),
                password: "saffron1".to_string(),
                phone: "9876543210".to_string(),
                address: "12 MG Road, Pune".to_string(),
            })
            .await?;
        let listings = buyer.marketplace(&MarketplaceQuery::default()).await?;
        info!(count = listings.len(), "Marketplace loaded");
        buyer.add_to_cart(&listing_id).await?;
        buyer.set_cart_quantity(&listing_id, 5.0);
        let summary = buyer.checkout_summary();
        info!(sub_total = summary.sub_total, delivery_fee = summary.delivery_fee, total = summary.total, "Checkout");
        let delivery = DeliveryContact {
            address: "12 MG Road, Pune".to_string(),
            phone: "9876543210".to_string(),
        };
        buyer.place_order(delivery, PaymentMethod::Cod).await
    }
    .instrument(tracing::info_span!("buyer_checkout"))
    .await?;
    info!(order_id = %order_id, "Order placed");

    farmer.mark_ready(&order_id).await?;

    // Rider accepts, verifies pickup and delivers
    let receipt = async {
        rider
            .register(RiderSignUp {
                rider_name: "Ravi Kumar".to_string(),
                email: "ravi@khetflow.in".to_string(),
                password: "ride1234".to_string(),
                phone: "9000000000".to_string(),
                vehicle_type: VehicleType::Bike,
                vehicle_number: "MH12 AB 1234".to_string(),
            })
            .await?;
        let open = rider.orders(OrderStatus::Pending).await?;
        info!(open = open.len(), "Open orders");
        rider.accept(&order_id, true).await?;

        let qr = farmer.listing_qr(&listing_id).await?;
        let mut pickup = rider.begin_pickup(&order_id);
        if let Err(e) = pickup.scan("smudged label") {
            warn!(error = %e, "Rescanning");
        }
        pickup.scan(&qr).map_err(OrderError::from)?;
        for item in ChecklistItem::ALL {
            pickup.check(item, true);
        }
        pickup.add_photo(rider.capture_image("image/jpeg", vec![0xFF; 2048])?);
        pickup.set_notes("Two crates, sealed");
        rider.verify_pickup(&pickup).await?;

        let mut handoff = rider.begin_delivery(&order_id).await?;
        if handoff.is_cash_on_delivery() {
            handoff.attach_payment_proof(rider.capture_image("image/jpeg", vec![0xD8; 1024])?);
        }
        rider.finish_delivery(handoff).await
    }
    .instrument(tracing::info_span!("rider_delivery"))
    .await?;
    info!(
        earning = receipt.earning,
        total_earnings = receipt.total_earnings,
        total_deliveries = receipt.total_deliveries,
        "Delivery complete"
    );

    let qr = farmer.listing_qr(&listing_id).await?;
    let confirmed = buyer.confirm_delivery(&order_id, &qr).await?;
    info!(delivery_verified = confirmed.delivery_verified(), "Buyer confirmed receipt");

    let earnings = farmer.refresh_earnings().await?;
    info!(realized = earnings.realized, pending = earnings.pending, "Farmer earnings");

    // Shutdown system gracefully
    drop((farmer, buyer, rider));
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
