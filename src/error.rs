//! Error types for asset loading and request-time classification.
//!
//! Two families exist and never mix:
//! - [`AssetLoadError`] happens once, at startup, and is fatal for the service.
//!   It is reported through the readiness probe, not through requests.
//! - [`ClassifyError`] is returned per request and leaves the service untouched.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::service::Readiness;

/// Startup failure while reading or validating a model artifact.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    /// The artifact file could not be opened or read
    #[error("failed to read {kind} artifact {path}: {source}")]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The artifact bytes are not valid JSON/CBOR for the expected layout
    #[error("failed to parse {kind} artifact {path}: {reason}")]
    Parse {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The artifact parsed but its content breaks a schema rule
    #[error("invalid {kind} artifact: {reason}")]
    Schema { kind: &'static str, reason: String },

    /// Artifacts are individually valid but disagree on dimensions
    #[error("shape mismatch: {0}")]
    Shape(String),
}

impl AssetLoadError {
    pub fn schema<S: Into<String>>(kind: &'static str, reason: S) -> Self {
        AssetLoadError::Schema {
            kind,
            reason: reason.into(),
        }
    }

    pub fn shape<S: Into<String>>(reason: S) -> Self {
        AssetLoadError::Shape(reason.into())
    }
}

/// Per-request failure of `classify`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Caller-correctable: empty or oversized text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Assets are not loaded (still loading, or loading failed)
    #[error("service is not ready (state: {0})")]
    NotReady(Readiness),
}

impl ClassifyError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ClassifyError::InvalidInput(msg.into())
    }

    /// Whether retrying the same request later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassifyError::NotReady(Readiness::Loading))
    }
}

pub type Result<T, E = ClassifyError> = std::result::Result<T, E>;
