use chrono::{DateTime, Utc};

use crate::media::CapturedImage;
use crate::provenance::ProvenancePayload;

/// The eight pickup quality checks a rider must tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistItem {
    Freshness,
    Packaging,
    Quantity,
    NoticeableDamage,
    TemperatureCheck,
    ColorCheck,
    NoPests,
    LabelingCorrect,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 8] = [
        ChecklistItem::Freshness,
        ChecklistItem::Packaging,
        ChecklistItem::Quantity,
        ChecklistItem::NoticeableDamage,
        ChecklistItem::TemperatureCheck,
        ChecklistItem::ColorCheck,
        ChecklistItem::NoPests,
        ChecklistItem::LabelingCorrect,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChecklistItem::Freshness => "freshness",
            ChecklistItem::Packaging => "packaging",
            ChecklistItem::Quantity => "quantity",
            ChecklistItem::NoticeableDamage => "noticeable_damage",
            ChecklistItem::TemperatureCheck => "temperature_check",
            ChecklistItem::ColorCheck => "color_check",
            ChecklistItem::NoPests => "no_pests",
            ChecklistItem::LabelingCorrect => "labeling_correct",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityChecklist {
    checks: [bool; 8],
}

impl QualityChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_passed() -> Self {
        Self { checks: [true; 8] }
    }

    pub fn set(&mut self, item: ChecklistItem, passed: bool) {
        self.checks[item.index()] = passed;
    }

    pub fn is_checked(&self, item: ChecklistItem) -> bool {
        self.checks[item.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.checks.iter().all(|c| *c)
    }

    /// Keys of the checks still unticked, in checklist order.
    pub fn missing(&self) -> Vec<&'static str> {
        ChecklistItem::ALL
            .iter()
            .filter(|item| !self.is_checked(**item))
            .map(|item| item.key())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
}

/// Pickup verification record. Written once per pickup and never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub id: String,
    pub order_id: String,
    pub rider_id: String,
    pub rider_name: String,
    pub scanned_product: ProvenancePayload,
    pub checklist: QualityChecklist,
    pub photos: Vec<CapturedImage>,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
    pub status: VerificationStatus,
}

#[derive(Debug, Clone)]
pub struct VerificationCreate {
    pub order_id: String,
    pub rider_id: String,
    pub rider_name: String,
    pub scanned_product: ProvenancePayload,
    pub checklist: QualityChecklist,
    pub photos: Vec<CapturedImage>,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}
