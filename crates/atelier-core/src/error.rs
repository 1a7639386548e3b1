//! Error handling for Atelier
//!
//! Provides error types for all layers of the core:
//! - Fiche errors (record validation, locked-record edits)
//! - Editor errors (rejected input, disabled surface)
//! - Step errors (production workflow guard violations)
//! - Export errors (capture/rasterization/sink)
//! - Store errors (document persistence)
//!
//! All error types use `thiserror` for ergonomic error handling. Nothing
//! here is fatal to the process: every failure is per-operation and the
//! user action can simply be retried.

use thiserror::Error;
use uuid::Uuid;

use crate::fiche::steps::Step;
use crate::logo::View;

/// Fiche record error type
///
/// Covers local input rejection (malformed prices, phones, colors) and
/// attempts to edit a validated record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FicheError {
    /// The fiche is validated and ordinary fields are immutable.
    #[error("Fiche {id} is validated; unvalidate it before editing")]
    Locked {
        /// The locked fiche id.
        id: Uuid,
    },

    /// A price entry could not be parsed or is negative.
    #[error("Invalid price '{input}': {reason}")]
    InvalidPrice {
        /// The raw user input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// The phone number is malformed.
    #[error("Invalid phone number: {reason}")]
    InvalidPhone {
        /// Why the number was rejected.
        reason: String,
    },

    /// A color value is not a hex color.
    #[error("Invalid color '{value}': expected #RRGGBB")]
    InvalidColor {
        /// The rejected value.
        value: String,
    },

    /// The preset-text token is not in the configured catalog.
    #[error("Unknown preset text '{token}'")]
    UnknownPreset {
        /// The rejected token.
        token: String,
    },

    /// No fiche with this id exists.
    #[error("Fiche {id} not found")]
    NotFound {
        /// The missing fiche id.
        id: Uuid,
    },
}

/// Interactive editor error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The editor is disabled (validated fiche); mutations are refused.
    #[error("Editor is disabled")]
    Disabled,

    /// The uploaded bytes are not a supported raster image.
    #[error("Unsupported image upload: {reason}")]
    UnsupportedImage {
        /// Why the upload was rejected.
        reason: String,
    },

    /// The view holds no logo object for the requested operation.
    #[error("No logo on {view} view")]
    NoPayload {
        /// The empty view.
        view: View,
    },

    /// Snapshot rasterization failed.
    #[error("Snapshot capture failed: {reason}")]
    SnapshotFailed {
        /// Why the capture failed.
        reason: String,
    },
}

/// Production workflow error type
///
/// Guard violations computed by the stepper; the caller is expected to
/// disable the offending control rather than surface these as faults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    /// The step is locked and never user-toggled.
    #[error("Step '{step}' is locked")]
    Locked {
        /// The locked step.
        step: Step,
    },

    /// An earlier step is still unset.
    #[error("Step '{step}' requires '{missing}' first")]
    PrecedenceViolated {
        /// The requested step.
        step: Step,
        /// The first unmet predecessor.
        missing: Step,
    },

    /// The step is already in the requested state.
    #[error("Step '{step}' is already in the requested state")]
    NoChange {
        /// The step.
        step: Step,
        /// The state it already has.
        value: bool,
    },

    /// Client notification requested before the workflow completed.
    #[error("Production is not complete; notification unavailable")]
    NotComplete,
}

/// Export pipeline error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// No tabular sink is configured; the row was kept locally.
    #[error("No export sink configured")]
    SinkUnavailable,

    /// No rasterizer is configured.
    #[error("No rasterizer configured")]
    RasterizerUnavailable,

    /// The rasterizer rejected the capture.
    #[error("Rasterization failed: {reason}")]
    RasterizerFailed {
        /// The collaborator's failure message.
        reason: String,
    },

    /// The rasterizer exceeded the bounded timeout.
    #[error("Rasterization timed out after {secs}s")]
    Timeout {
        /// The configured bound in seconds.
        secs: u64,
    },
}

/// Document store error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store is unreachable or not configured.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// The underlying failure.
        reason: String,
    },

    /// The record could not be (de)serialized.
    #[error("Serialization failed: {reason}")]
    Serialization {
        /// The underlying failure.
        reason: String,
    },

    /// No fiche with this id exists in the store.
    #[error("Fiche {id} not found in store")]
    Missing {
        /// The missing fiche id.
        id: Uuid,
    },
}

/// Main error type for Atelier
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Fiche record error
    #[error(transparent)]
    Fiche(#[from] FicheError),

    /// Editor error
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Production workflow error
    #[error(transparent)]
    Step(#[from] StepError),

    /// Export pipeline error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Document store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this failure should degrade to a local fallback rather
    /// than abort the user action.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Error::Export(ExportError::SinkUnavailable) | Error::Store(StoreError::Unavailable { .. })
        )
    }

    /// Check if this is a workflow guard violation
    pub fn is_step_error(&self) -> bool {
        matches!(self, Error::Step(_))
    }

    /// Check if this is a local input rejection
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Error::Fiche(
                FicheError::InvalidPrice { .. }
                    | FicheError::InvalidPhone { .. }
                    | FicheError::InvalidColor { .. }
                    | FicheError::UnknownPreset { .. }
            ) | Error::Editor(EditorError::UnsupportedImage { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
