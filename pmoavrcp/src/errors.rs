//! Error types for the browsing marshalling layer.

use thiserror::Error;

/// Contract violations detected while encoding or assembling browse data.
///
/// None of these are transient: they are returned to the immediate caller
/// and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    #[error("Malformed UID: expected {expected} bytes, got {actual}")]
    MalformedUid { expected: usize, actual: usize },

    #[error("Invalid feature mask size: expected {expected} chunks, got {actual}")]
    InvalidMaskSize { expected: usize, actual: usize },

    #[error("Length mismatch on {field}: expected {expected}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Inconsistent {bundle} bundle: {field} has {actual} entries, expected {expected}")]
    InconsistentBundleSize {
        bundle: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Attributes were requested but never populated")]
    AttributesNotPopulated,

    #[error("Attributes were populated but the listing declares none requested")]
    AttributesNotRequested,

    #[error("An attribute list of {0} ids has no count encoding")]
    UnencodableAttributeList(usize),

    #[error("Index {index} out of range for {size} items")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown {kind} value {value:#04x}")]
    UnknownValue { kind: &'static str, value: u32 },
}

impl BrowseError {
    pub fn length_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        BrowseError::LengthMismatch {
            field,
            expected,
            actual,
        }
    }

    pub fn inconsistent(
        bundle: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    ) -> Self {
        BrowseError::InconsistentBundleSize {
            bundle,
            field,
            expected,
            actual,
        }
    }

    /// `NotFound` is an expected outcome of a directory lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrowseError::NotFound(_))
    }
}

/// Result type for pmoavrcp
pub type Result<T> = std::result::Result<T, BrowseError>;
