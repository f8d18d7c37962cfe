use std::convert::Infallible;

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentMethod, PaymentStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = Infallible; // Orders only change through lifecycle actions
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    const COLLECTION: &'static str = "orders";

    /// Creates a new pending order from a checkout.
    ///
    /// Subtotal, item count and total are derived here, so
    /// `total_amount == sub_total + delivery_fee` holds for every stored order.
    /// Online orders are recorded as paid; cash-on-delivery orders as pending.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        for item in &params.items {
            let valid_price = item.unit_price.is_finite() && item.unit_price >= 0.0;
            let valid_quantity = item.quantity.is_finite() && item.quantity > 0.0;
            if !valid_price || !valid_quantity {
                return Err(OrderError::InvalidLineItem(item.listing_id.clone()));
            }
        }

        let sub_total: f64 = params.items.iter().map(|item| item.subtotal()).sum();
        let total_items: f64 = params.items.iter().map(|item| item.quantity).sum();
        let payment_status = match params.payment_method {
            PaymentMethod::Online => PaymentStatus::Paid,
            PaymentMethod::Cod => PaymentStatus::Pending,
        };

        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            buyer_name: params.buyer_name,
            items: params.items,
            total_items,
            sub_total,
            delivery_fee: params.delivery_fee,
            total_amount: sub_total + f64::from(params.delivery_fee),
            payment_method: params.payment_method,
            payment_status,
            delivery: params.delivery,
            status: OrderStatus::Pending,
            ready_for_pickup: false,
            rider: None,
            farm_address: params.farm_address,
            farm_phone: params.farm_phone,
            created_at: params.created_at,
            accepted_at: None,
            ready_at: None,
            delivered_at: None,
            pickup: None,
            payment_proof: None,
            delivery_confirmation: None,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::DeleteNotAllowed)
    }

    /// Applies one lifecycle transition. Every guard runs before any field
    /// is written.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::MarkReadyForPickup { farmer_id, at } => {
                if !self.involves_farmer(&farmer_id) {
                    return Err(OrderError::NotOrderFarmer(farmer_id));
                }
                if self.status != OrderStatus::Pending || self.rider.is_some() {
                    return Err(OrderError::ReadyTooLate(self.status));
                }
                if !self.ready_for_pickup {
                    self.ready_for_pickup = true;
                    self.ready_at = Some(at);
                }
                Ok(OrderActionResult::MarkReadyForPickup(self.clone()))
            }
            OrderAction::Accept { rider, at } => {
                if let Some(current) = &self.rider {
                    return Err(OrderError::AlreadyAccepted(current.rider_id.clone()));
                }
                self.advance(OrderStatus::Accepted)?;
                self.rider = Some(rider);
                self.accepted_at = Some(at);
                Ok(OrderActionResult::Accept(self.clone()))
            }
            OrderAction::CompletePickup { rider_id, record } => {
                self.ensure_rider(&rider_id)?;
                if self.pickup.is_some() {
                    return Err(OrderError::AlreadyVerified);
                }
                if record.photos.is_empty() {
                    return Err(OrderError::MissingPhotos);
                }
                self.advance(OrderStatus::Picked)?;
                self.pickup = Some(record);
                Ok(OrderActionResult::CompletePickup(self.clone()))
            }
            OrderAction::Deliver {
                rider_id,
                payment_proof,
                at,
            } => {
                self.ensure_rider(&rider_id)?;
                if self.payment_method.is_cash_on_delivery() && payment_proof.is_none() {
                    return Err(OrderError::MissingPaymentProof);
                }
                self.advance(OrderStatus::Delivered)?;
                self.payment_status = PaymentStatus::Paid;
                self.payment_proof = payment_proof;
                self.delivered_at = Some(at);
                Ok(OrderActionResult::Deliver(self.clone()))
            }
            OrderAction::ConfirmDelivery { buyer_id, confirmation } => {
                if self.buyer_id != buyer_id {
                    return Err(OrderError::NotOrderBuyer(buyer_id));
                }
                if self.delivery_confirmation.is_some() {
                    return Err(OrderError::AlreadyConfirmed);
                }
                if self.status < OrderStatus::Picked {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Delivered,
                    });
                }
                self.delivery_confirmation = Some(confirmation);
                Ok(OrderActionResult::ConfirmDelivery(self.clone()))
            }
        }
    }
}

impl Order {
    fn advance(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_advance_to(to) {
            return Err(OrderError::InvalidTransition { from: self.status, to });
        }
        self.status = to;
        Ok(())
    }

    fn ensure_rider(&self, rider_id: &str) -> Result<(), OrderError> {
        match self.rider_id() {
            Some(assigned) if assigned == rider_id => Ok(()),
            _ => Err(OrderError::NotAssignedRider(rider_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DeliveryConfirmation, DeliveryContact, FarmOrigin, Grade, LineItem, Listing, ListingStatus,
        PickupRecord, RiderAssignment,
    };
    use crate::media::CapturedImage;
    use crate::provenance::ProvenancePayload;
    use chrono::Utc;

    fn create(method: PaymentMethod) -> Order {
        Order::from_create_params(
            "order_1".to_string(),
            OrderCreate {
                buyer_id: "buyer_1".to_string(),
                buyer_name: "Hotel Saffron".to_string(),
                items: vec![
                    LineItem {
                        listing_id: "a".to_string(),
                        name: "Tomatoes".to_string(),
                        unit_price: 20.0,
                        quantity: 3.0,
                        farmer_id: "farmer_1".to_string(),
                        grade: Grade::B,
                    },
                    LineItem {
                        listing_id: "b".to_string(),
                        name: "Onions".to_string(),
                        unit_price: 50.0,
                        quantity: 1.0,
                        farmer_id: "farmer_2".to_string(),
                        grade: Grade::C,
                    },
                ],
                delivery_fee: 100,
                payment_method: method,
                delivery: DeliveryContact {
                    address: "12 MG Road".to_string(),
                    phone: "9876543210".to_string(),
                },
                farm_address: None,
                farm_phone: None,
                created_at: Utc::now(),
            },
        )
        .unwrap()
    }

    fn rider(id: &str) -> RiderAssignment {
        RiderAssignment {
            rider_id: id.to_string(),
            rider_name: "Ravi".to_string(),
            rider_phone: "9000000000".to_string(),
        }
    }

    fn photo() -> CapturedImage {
        CapturedImage::new("image/jpeg", vec![1u8; 16]).unwrap()
    }

    fn pickup_record() -> PickupRecord {
        PickupRecord {
            verification_id: "verification_1".to_string(),
            photos: vec![photo()],
            notes: String::new(),
            verified_at: Utc::now(),
        }
    }

    fn confirmation() -> DeliveryConfirmation {
        let listing = Listing {
            id: "a".to_string(),
            origin: FarmOrigin::default(),
            name: "Tomatoes".to_string(),
            quantity: 1.0,
            price: 20.0,
            original_price: 20.0,
            grade: Grade::B,
            description: String::new(),
            image: None,
            flash_sale: None,
            status: ListingStatus::Active,
            created_at: Utc::now(),
        };
        DeliveryConfirmation {
            scanned: ProvenancePayload::issue(&listing),
            confirmed_at: Utc::now(),
        }
    }

    fn accept(order: &mut Order, rider_id: &str) -> Result<OrderActionResult, OrderError> {
        order.handle_action(OrderAction::Accept {
            rider: rider(rider_id),
            at: Utc::now(),
        })
    }

    fn pick(order: &mut Order, rider_id: &str) -> Result<OrderActionResult, OrderError> {
        order.handle_action(OrderAction::CompletePickup {
            rider_id: rider_id.to_string(),
            record: pickup_record(),
        })
    }

    fn deliver(order: &mut Order, proof: Option<CapturedImage>) -> Result<OrderActionResult, OrderError> {
        order.handle_action(OrderAction::Deliver {
            rider_id: "rider_1".to_string(),
            payment_proof: proof,
            at: Utc::now(),
        })
    }

    #[test]
    fn test_creation_derives_totals() {
        let order = create(PaymentMethod::Online);
        assert_eq!(order.sub_total, 110.0);
        assert_eq!(order.delivery_fee, 100);
        assert_eq!(order.total_amount, 210.0);
        assert_eq!(order.total_items, 4.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(create(PaymentMethod::Cod).payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_creation_rejects_empty_and_invalid_items() {
        let mut params = OrderCreate {
            buyer_id: "b".to_string(),
            buyer_name: "B".to_string(),
            items: Vec::new(),
            delivery_fee: 0,
            payment_method: PaymentMethod::Online,
            delivery: DeliveryContact {
                address: "x".to_string(),
                phone: "9876543210".to_string(),
            },
            farm_address: None,
            farm_phone: None,
            created_at: Utc::now(),
        };
        assert_eq!(
            Order::from_create_params("o".to_string(), params.clone()).unwrap_err(),
            OrderError::EmptyCart
        );

        params.items.push(LineItem {
            listing_id: "neg".to_string(),
            name: "x".to_string(),
            unit_price: -1.0,
            quantity: 1.0,
            farmer_id: "f".to_string(),
            grade: Grade::B,
        });
        assert_eq!(
            Order::from_create_params("o".to_string(), params).unwrap_err(),
            OrderError::InvalidLineItem("neg".to_string())
        );
    }

    #[test]
    fn test_full_forward_lifecycle() {
        let mut order = create(PaymentMethod::Online);
        accept(&mut order, "rider_1").unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.rider_id(), Some("rider_1"));
        assert!(order.accepted_at.is_some());

        pick(&mut order, "rider_1").unwrap();
        assert_eq!(order.status, OrderStatus::Picked);
        assert!(order.verification_completed());

        deliver(&mut order, None).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert!(order.delivered_at.is_some());
    }

    #[test]
    fn test_cannot_skip_or_repeat_steps() {
        let mut order = create(PaymentMethod::Online);
        assert_eq!(
            deliver(&mut order, None).unwrap_err(),
            OrderError::NotAssignedRider("rider_1".to_string())
        );

        accept(&mut order, "rider_1").unwrap();
        assert_eq!(
            deliver(&mut order, None).unwrap_err(),
            OrderError::InvalidTransition {
                from: OrderStatus::Accepted,
                to: OrderStatus::Delivered
            }
        );

        pick(&mut order, "rider_1").unwrap();
        assert_eq!(pick(&mut order, "rider_1").unwrap_err(), OrderError::AlreadyVerified);

        deliver(&mut order, None).unwrap();
        assert!(matches!(
            deliver(&mut order, None).unwrap_err(),
            OrderError::InvalidTransition { from: OrderStatus::Delivered, .. }
        ));
    }

    #[test]
    fn test_second_accept_is_rejected() {
        let mut order = create(PaymentMethod::Online);
        accept(&mut order, "rider_1").unwrap();
        assert_eq!(
            accept(&mut order, "rider_2").unwrap_err(),
            OrderError::AlreadyAccepted("rider_1".to_string())
        );
        assert_eq!(order.rider_id(), Some("rider_1"));
    }

    #[test]
    fn test_only_assigned_rider_can_pick_up() {
        let mut order = create(PaymentMethod::Online);
        accept(&mut order, "rider_1").unwrap();
        assert_eq!(
            pick(&mut order, "rider_2").unwrap_err(),
            OrderError::NotAssignedRider("rider_2".to_string())
        );
    }

    #[test]
    fn test_cod_requires_payment_proof() {
        let mut order = create(PaymentMethod::Cod);
        accept(&mut order, "rider_1").unwrap();
        pick(&mut order, "rider_1").unwrap();

        assert_eq!(deliver(&mut order, None).unwrap_err(), OrderError::MissingPaymentProof);
        assert_eq!(order.status, OrderStatus::Picked);
        assert_eq!(order.payment_status, PaymentStatus::Pending);

        deliver(&mut order, Some(photo())).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert!(order.payment_proof.is_some());
    }

    #[test]
    fn test_ready_for_pickup_is_advisory_and_farmer_scoped() {
        let mut order = create(PaymentMethod::Online);
        let result = order.handle_action(OrderAction::MarkReadyForPickup {
            farmer_id: "stranger".to_string(),
            at: Utc::now(),
        });
        assert_eq!(result.unwrap_err(), OrderError::NotOrderFarmer("stranger".to_string()));

        order
            .handle_action(OrderAction::MarkReadyForPickup {
                farmer_id: "farmer_2".to_string(),
                at: Utc::now(),
            })
            .unwrap();
        assert!(order.ready_for_pickup);
        assert_eq!(order.status, OrderStatus::Pending);

        accept(&mut order, "rider_1").unwrap();
        let late = order.handle_action(OrderAction::MarkReadyForPickup {
            farmer_id: "farmer_1".to_string(),
            at: Utc::now(),
        });
        let err = late.unwrap_err();
        assert_eq!(err, OrderError::ReadyTooLate(OrderStatus::Accepted));
        assert_eq!(
            err.to_string(),
            "Order is already accepted; it can no longer be marked ready for pickup"
        );
    }

    #[test]
    fn test_buyer_confirmation_is_independent_and_set_once() {
        let mut order = create(PaymentMethod::Online);
        let early = order.handle_action(OrderAction::ConfirmDelivery {
            buyer_id: "buyer_1".to_string(),
            confirmation: confirmation(),
        });
        assert!(matches!(early, Err(OrderError::InvalidTransition { .. })));

        accept(&mut order, "rider_1").unwrap();
        pick(&mut order, "rider_1").unwrap();

        let wrong_buyer = order.handle_action(OrderAction::ConfirmDelivery {
            buyer_id: "buyer_2".to_string(),
            confirmation: confirmation(),
        });
        assert_eq!(wrong_buyer.unwrap_err(), OrderError::NotOrderBuyer("buyer_2".to_string()));

        order
            .handle_action(OrderAction::ConfirmDelivery {
                buyer_id: "buyer_1".to_string(),
                confirmation: confirmation(),
            })
            .unwrap();
        assert!(order.delivery_verified());
        assert_eq!(order.status, OrderStatus::Picked);

        let again = order.handle_action(OrderAction::ConfirmDelivery {
            buyer_id: "buyer_1".to_string(),
            confirmation: confirmation(),
        });
        assert_eq!(again.unwrap_err(), OrderError::AlreadyConfirmed);

        // The rider can still deliver and get paid.
        deliver(&mut order, None).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.delivery_verified());
    }

    #[test]
    fn test_orders_cannot_be_deleted() {
        assert_eq!(create(PaymentMethod::Online).on_delete().unwrap_err(), OrderError::DeleteNotAllowed);
    }
}
