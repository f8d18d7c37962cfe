//! Captured image payloads (pickup photos, payment proofs, listing images).

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Largest image accepted from a capture, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5_000_000;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImageError {
    #[error("Image is empty")]
    Empty,
    #[error("Image too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

/// An image accepted at capture time. The size ceiling is enforced here,
/// before anything can be attached to a document.
#[derive(Clone, PartialEq)]
pub struct CapturedImage {
    content_type: String,
    bytes: Arc<[u8]>,
}

impl CapturedImage {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<Self, ImageError> {
        Self::with_limit(content_type, bytes, MAX_IMAGE_BYTES)
    }

    pub fn with_limit(
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        limit: usize,
    ) -> Result<Self, ImageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > limit {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Ok(Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Keep image bodies out of debug output and logs.
impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
