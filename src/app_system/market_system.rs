use tracing::{error, info};
use uuid::Uuid;

use super::SystemError;
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::auth::{AuthClient, AuthService};
use crate::clients::{BusinessClient, FarmerClient, ListingClient, OrderClient, RiderClient, VerificationClient};
use crate::config::AppConfig;
use crate::domain::{Business, Farmer, Listing, Order, Rider, Verification};
use crate::portals::{BuyerPortal, FarmerPortal, RiderPortal};

/// The whole marketplace backend: one store actor per collection plus the
/// auth actor, wired into clients.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct MarketSystem {
    pub order_client: OrderClient,
    pub listing_client: ListingClient,
    pub verification_client: VerificationClient,
    pub farmer_client: FarmerClient,
    pub business_client: BusinessClient,
    pub rider_client: RiderClient,
    pub auth_client: AuthClient,
    config: AppConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns every actor. Must be called inside a tokio runtime.
    pub fn new(config: AppConfig) -> Self {
        let buffer = config.store_buffer;
        let mut handles = Vec::new();

        let listing_client = ListingClient::new(spawn_store::<Listing>(buffer, "listing", &mut handles));
        let verification_client =
            VerificationClient::new(spawn_store::<Verification>(buffer, "verification", &mut handles));
        let farmer_client = FarmerClient::new(spawn_store::<Farmer>(buffer, "farmer", &mut handles));
        let business_client = BusinessClient::new(spawn_store::<Business>(buffer, "business", &mut handles));
        let rider_client = RiderClient::new(spawn_store::<Rider>(buffer, "rider", &mut handles));
        let order_client = OrderClient::new(
            spawn_store::<Order>(buffer, "order", &mut handles),
            listing_client.clone(),
            verification_client.clone(),
            rider_client.clone(),
            config.delivery_fees,
        );

        let (auth_service, auth_client) = AuthService::new(buffer);
        handles.push(tokio::spawn(auth_service.run()));

        info!(actors = handles.len(), "Market system started");
        Self {
            order_client,
            listing_client,
            verification_client,
            farmer_client,
            business_client,
            rider_client,
            auth_client,
            config,
            handles,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn buyer_portal(&self) -> BuyerPortal {
        BuyerPortal::new(
            self.auth_client.clone(),
            self.business_client.clone(),
            self.listing_client.clone(),
            self.order_client.clone(),
            self.config.delivery_fees,
        )
    }

    pub fn farmer_portal(&self) -> FarmerPortal {
        FarmerPortal::new(
            self.auth_client.clone(),
            self.farmer_client.clone(),
            self.listing_client.clone(),
            self.order_client.clone(),
            self.config.max_image_bytes,
        )
    }

    pub fn rider_portal(&self) -> RiderPortal {
        RiderPortal::new(
            self.auth_client.clone(),
            self.rider_client.clone(),
            self.order_client.clone(),
            self.config.max_image_bytes,
        )
    }

    /// Drops the system's clients and waits for every actor to drain.
    ///
    /// Actors only stop once every client clone is gone, so portals handed
    /// out by this system must be dropped first.
    pub async fn shutdown(mut self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let handles = std::mem::take(&mut self.handles);
        drop(self);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_store<T>(buffer: usize, prefix: &'static str, handles: &mut Vec<tokio::task::JoinHandle<()>>) -> ResourceClient<T>
where
    T: Entity<Id = String>,
{
    let next_id = move || format!("{}_{}", prefix, Uuid::new_v4().simple());
    let (actor, client) = ResourceActor::<T>::new(buffer, next_id);
    handles.push(tokio::spawn(actor.run()));
    client
}
