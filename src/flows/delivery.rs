use tracing::warn;

use crate::domain::{Order, PaymentMethod};
use crate::earnings::rider_earning;
use crate::media::CapturedImage;
use crate::order_actor::OrderError;
use crate::provenance::ProvenancePayload;

/// The rider's hand-over screen for one picked-up order.
#[derive(Debug, Clone)]
pub struct DeliveryHandoff {
    order: Order,
    payment_proof: Option<CapturedImage>,
}

impl DeliveryHandoff {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            payment_proof: None,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// What the rider will be credited for this delivery.
    pub fn earning(&self) -> u32 {
        rider_earning(self.order.delivery_fee)
    }

    pub fn is_cash_on_delivery(&self) -> bool {
        self.order.payment_method == PaymentMethod::Cod
    }

    /// Cash to collect at the door, if any.
    pub fn amount_to_collect(&self) -> Option<f64> {
        self.is_cash_on_delivery().then_some(self.order.total_amount)
    }

    pub fn attach_payment_proof(&mut self, proof: CapturedImage) {
        self.payment_proof = Some(proof);
    }

    pub fn payment_proof(&self) -> Option<&CapturedImage> {
        self.payment_proof.as_ref()
    }

    pub fn can_finish(&self) -> bool {
        !self.is_cash_on_delivery() || self.payment_proof.is_some()
    }

    /// Hands back the order id and proof for `OrderClient::complete_delivery`.
    pub fn finish(self) -> Result<(String, Option<CapturedImage>), OrderError> {
        if !self.can_finish() {
            return Err(OrderError::MissingPaymentProof);
        }
        Ok((self.order.id, self.payment_proof))
    }
}

/// Decodes a buyer's delivery scan. A bad scan is only a warning: it blocks
/// the buyer's confirmation and nothing else.
pub fn read_buyer_scan(order_id: &str, raw: &str) -> Result<ProvenancePayload, OrderError> {
    ProvenancePayload::parse(raw).map_err(|e| {
        warn!(order_id, error = %e, "Delivery scan could not be read");
        OrderError::from(e)
    })
}
