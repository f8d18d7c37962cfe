//! Runtime configuration, read from the environment (and `.env` when present).

use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::earnings::{DeliveryFeeSchedule, DEFAULT_ESTIMATED_DISTANCE_KM, DEFAULT_RATE_PER_KM};
use crate::media::MAX_IMAGE_BYTES;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub delivery_fees: DeliveryFeeSchedule,
    pub max_image_bytes: usize,
    /// Capacity of each store actor's request channel.
    pub store_buffer: usize,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delivery_fees: DeliveryFeeSchedule::default(),
            max_image_bytes: MAX_IMAGE_BYTES,
            store_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source. Unset variables fall back
    /// to their defaults; set but unparsable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let rate_per_km = parse_var(&lookup, "KHETFLOW_DELIVERY_RATE_PER_KM", DEFAULT_RATE_PER_KM)?;
        let estimated_distance_km =
            parse_var(&lookup, "KHETFLOW_ESTIMATED_DISTANCE_KM", DEFAULT_ESTIMATED_DISTANCE_KM)?;
        let max_image_bytes = parse_var(&lookup, "KHETFLOW_MAX_IMAGE_BYTES", MAX_IMAGE_BYTES)?;
        let store_buffer = parse_var(&lookup, "KHETFLOW_STORE_BUFFER", 32usize)?;
        let log_filter = lookup("KHETFLOW_LOG").unwrap_or_else(|| "info".to_string());

        for (var, value) in [
            ("KHETFLOW_DELIVERY_RATE_PER_KM", rate_per_km),
            ("KHETFLOW_ESTIMATED_DISTANCE_KM", estimated_distance_km),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    var,
                    value: value.to_string(),
                    reason: "must be a non-negative number".to_string(),
                });
            }
        }
        if store_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "KHETFLOW_STORE_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        tracing::info!("Application configuration loaded successfully.");
        Ok(Self {
            delivery_fees: DeliveryFeeSchedule {
                rate_per_km,
                estimated_distance_km,
            },
            max_image_bytes,
            store_buffer,
            log_filter,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
