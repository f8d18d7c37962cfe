use tracing::{debug, warn};

use crate::domain::{ChecklistItem, QualityChecklist};
use crate::media::CapturedImage;
use crate::order_actor::OrderError;
use crate::provenance::{ProvenancePayload, ScanError};

/// Everything a rider gathered at the farm gate, checked and ready to submit.
#[derive(Debug, Clone)]
pub struct PickupSubmission {
    pub scanned: ProvenancePayload,
    pub checklist: QualityChecklist,
    pub photos: Vec<CapturedImage>,
    pub notes: String,
}

/// A rider's in-progress pickup verification for one order.
///
/// Nothing here touches a store. `OrderClient::verify_pickup` takes the
/// result of [`PickupSession::ready`] and performs the writes.
#[derive(Debug, Clone)]
pub struct PickupSession {
    order_id: String,
    scanned: Option<ProvenancePayload>,
    checklist: QualityChecklist,
    photos: Vec<CapturedImage>,
    notes: String,
}

impl PickupSession {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            scanned: None,
            checklist: QualityChecklist::new(),
            photos: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Reads a QR payload. A payload that does not parse leaves the session
    /// exactly as it was, including any earlier good scan.
    pub fn scan(&mut self, raw: &str) -> Result<&ProvenancePayload, ScanError> {
        match ProvenancePayload::parse(raw) {
            Ok(payload) => {
                debug!(order_id = %self.order_id, listing_id = %payload.id, "QR scanned");
                Ok(self.scanned.insert(payload))
            }
            Err(e) => {
                warn!(order_id = %self.order_id, error = %e, "QR scan rejected");
                Err(e)
            }
        }
    }

    pub fn scanned(&self) -> Option<&ProvenancePayload> {
        self.scanned.as_ref()
    }

    pub fn check(&mut self, item: ChecklistItem, passed: bool) {
        self.checklist.set(item, passed);
    }

    pub fn checklist(&self) -> &QualityChecklist {
        &self.checklist
    }

    pub fn add_photo(&mut self, photo: CapturedImage) {
        self.photos.push(photo);
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<CapturedImage> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn photos(&self) -> &[CapturedImage] {
        &self.photos
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Checks the scan, then the checklist, then the photos, and reports the
    /// first gap found.
    pub fn ready(&self) -> Result<PickupSubmission, OrderError> {
        let scanned = self.scanned.clone().ok_or(OrderError::MissingScan)?;
        if !self.checklist.is_complete() {
            return Err(OrderError::IncompleteChecklist {
                missing: self.checklist.missing(),
            });
        }
        if self.photos.is_empty() {
            return Err(OrderError::MissingPhotos);
        }
        Ok(PickupSubmission {
            scanned,
            checklist: self.checklist,
            photos: self.photos.clone(),
            notes: self.notes.clone(),
        })
    }
}
