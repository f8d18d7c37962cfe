//! Field-level validation shared by sign-up forms, checkout and listing forms.
//!
//! Validators return the message shown next to the field. [`FieldErrors`]
//! collects them so a form is rejected as a whole before any store call.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("phone pattern"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field check.
    pub fn check(&mut self, field: &'static str, outcome: Result<(), String>) -> &mut Self {
        if let Err(message) = outcome {
            self.0.entry(field).or_insert(message);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

pub fn required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), String> {
    required("Email", value)?;
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err("Email is invalid".to_string())
    }
}

pub fn password(value: &str) -> Result<(), String> {
    required("Password", value)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        Err(format!("Password must be at least {} characters", MIN_PASSWORD_LEN))
    } else {
        Ok(())
    }
}

pub fn phone(value: &str) -> Result<(), String> {
    required("Phone", value)?;
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err("Phone must be 10 digits".to_string())
    }
}

pub fn positive(label: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be greater than zero", label))
    }
}
