//! QR provenance payload: issued by the farmer, scanned by rider and buyer.
//!
//! The JSON text is a wire contract shared with every scanner, so field order,
//! key names, number rendering and the timestamp format are fixed:
//!
//! ```text
//! {"id":..,"name":..,"quantity":..,"price":..,"grade":..,"farmerId":..,
//!  "farmerName":..,"farmName":..,"farmLocation":..,"timestamp":..}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Grade, Listing};

const UNKNOWN_FARMER: &str = "Unknown Farmer";
const UNKNOWN_FARM: &str = "Unknown Farm";
const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanError {
    #[error("Invalid QR code: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenancePayload {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "number::serialize")]
    pub quantity: f64,
    #[serde(serialize_with = "number::serialize")]
    pub price: f64,
    pub grade: Grade,
    pub farmer_id: String,
    pub farmer_name: String,
    pub farm_name: String,
    pub farm_location: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ProvenancePayload {
    /// Build a payload from the listing's current fields, stamped now.
    pub fn issue(listing: &Listing) -> Self {
        Self::issue_at(listing, Utc::now())
    }

    pub fn issue_at(listing: &Listing, timestamp: DateTime<Utc>) -> Self {
        let origin = &listing.origin;
        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            quantity: listing.quantity,
            price: listing.price,
            grade: listing.grade,
            farmer_id: origin.farmer_id.clone(),
            farmer_name: or_unknown(&origin.farmer_name, UNKNOWN_FARMER),
            farm_name: or_unknown(&origin.farm_name, UNKNOWN_FARM),
            farm_location: or_unknown(&origin.farm_location, UNKNOWN_LOCATION),
            timestamp,
        }
    }

    /// Decode scanned text. Anything that is not a complete payload is rejected.
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        serde_json::from_str(raw.trim()).map_err(|e| ScanError::Malformed(e.to_string()))
    }

    /// The exact text to embed in the QR code.
    pub fn to_qr_string(&self) -> String {
        // Only strings, finite numbers and a timestamp go in, none of which can fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn or_unknown(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Numbers rendered the way scanners expect: `50`, not `50.0`.
mod number {
    use serde::Serializer;

    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }
}

/// UTC timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FarmOrigin, ListingStatus};
    use chrono::TimeZone;

    fn listing() -> Listing {
        Listing {
            id: "listing_1".to_string(),
            origin: FarmOrigin {
                farmer_id: "farmer_1".to_string(),
                farmer_name: "Ramesh".to_string(),
                farm_name: "Green Acres".to_string(),
                farm_location: String::new(),
            },
            name: "Tomatoes".to_string(),
            quantity: 50.0,
            price: 22.5,
            original_price: 22.5,
            grade: Grade::B,
            description: String::new(),
            image: None,
            flash_sale: None,
            status: ListingStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_wire_format_is_fixed() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let payload = ProvenancePayload::issue_at(&listing(), at);
        assert_eq!(
            payload.to_qr_string(),
            concat!(
                r#"{"id":"listing_1","name":"Tomatoes","quantity":50,"price":22.5,"grade":"B","#,
                r#""farmerId":"farmer_1","farmerName":"Ramesh","farmName":"Green Acres","#,
                r#""farmLocation":"Unknown Location","timestamp":"2025-03-01T09:30:00.000Z"}"#
            )
        );
    }

    #[test]
    fn test_reissue_differs_only_in_timestamp() {
        let listing = listing();
        let first = ProvenancePayload::issue_at(&listing, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        let second = ProvenancePayload::issue_at(&listing, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
        assert_ne!(first, second);
        assert_eq!(
            ProvenancePayload {
                timestamp: first.timestamp,
                ..second
            },
            first
        );
    }

    #[test]
    fn test_parse_accepts_issued_text() {
        let issued = ProvenancePayload::issue(&listing());
        let parsed = ProvenancePayload::parse(&issued.to_qr_string()).unwrap();
        assert_eq!(parsed.id, "listing_1");
        assert_eq!(parsed.quantity, 50.0);
        assert_eq!(parsed.timestamp.timestamp_millis(), issued.timestamp.timestamp_millis());
    }

    #[test]
    fn test_parse_fails_closed() {
        assert!(ProvenancePayload::parse("not json").is_err());
        assert!(ProvenancePayload::parse(r#"{"id":"listing_1"}"#).is_err());
        assert!(ProvenancePayload::parse(
            r#"{"id":"x","name":"y","quantity":1,"price":1,"grade":"A","farmerId":"f","farmerName":"n","farmName":"m","farmLocation":"l","timestamp":"2025-03-01T09:30:00.000Z"}"#
        )
        .is_err());
        assert!(ProvenancePayload::parse("https://example.com/product/1").is_err());
    }
}
