//! dataset::errors — error types for the dataset stack.
//!
//! Purpose
//! -------
//! Define [`DatasetError`] and the [`DatasetResult`] alias covering
//! keyword parsing (numeric type, dataset type, encoding), specification
//! validation, and the payload codec. Unit-level failures bubble up
//! through a `From<UnitsError>` wrapper.
//!
//! Conventions
//! -----------
//! - Payload variants carry the channel index where decoding failed so a
//!   multi-channel message pinpoints the offender.
//! - `InvalidEncoding` carries a free-form detail string because it
//!   covers both unknown keywords and payload-kind mismatches.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::units::errors::UnitsError;

/// Result alias for dataset construction and the payload codec.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Unified error type for dataset specifications and payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    // ---- Keyword parsing ----
    /// The numeric-type keyword names none of the thirteen sample types.
    InvalidNumericType { keyword: String },

    /// The dataset-type keyword matches none of the six component
    /// layouts, or carries a zero size.
    InvalidDatasetType { keyword: String },

    /// The encoding keyword is unknown, or the payload kind contradicts
    /// the declared encoding.
    InvalidEncoding { detail: String },

    // ---- Specification ----
    /// A required key is absent from the dataset specification.
    MissingField { field: &'static str },

    /// A raw-encoded dataset names a sidecar that was not supplied.
    MissingPayload { uri: String },

    /// `component_labels` must carry exactly one label per channel.
    LabelCountMismatch { expected: usize, found: usize },

    /// A unit parse/consistency failure from the units stack.
    Units(UnitsError),

    // ---- Payload decoding ----
    /// The payload holds the wrong number of channels.
    ComponentCountMismatch { expected: usize, found: usize },

    /// Channels of one payload must decode to equal lengths.
    RaggedComponents { channel: usize, expected: usize, found: usize },

    /// A complex channel interleaves `[re, im, …]`, so its length must be
    /// even.
    OddComplexLength { channel: usize, length: usize },

    /// A byte payload is not a whole number of samples.
    ByteLengthMismatch { width: usize, length: usize },

    /// A raw blob cannot be split evenly across the channels.
    UnevenChannelSplit { total: usize, channels: usize },

    /// A buffer's per-channel length does not match the declared grid.
    GridSizeMismatch { points: usize, grid: usize },

    /// A channel's base64 text failed to decode.
    Base64Decode { channel: usize, detail: String },

    /// A channel's inline JSON holds a value outside the declared type.
    InlinePayload { channel: usize, detail: String },

    // ---- Encoding ----
    /// JSON cannot represent a NaN or infinite sample inline.
    NonFiniteInline { channel: usize },
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Units(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Keyword parsing ----
            DatasetError::InvalidNumericType { keyword } => {
                write!(f, "Unknown numeric type {keyword:?}.")
            }
            DatasetError::InvalidDatasetType { keyword } => {
                write!(f, "Unknown dataset type {keyword:?}.")
            }
            DatasetError::InvalidEncoding { detail } => {
                write!(f, "Invalid encoding: {detail}.")
            }
            // ---- Specification ----
            DatasetError::MissingField { field } => {
                write!(f, "Dataset specification is missing {field}.")
            }
            DatasetError::MissingPayload { uri } => {
                write!(f, "No payload bytes supplied for components_URI {uri:?}.")
            }
            DatasetError::LabelCountMismatch { expected, found } => {
                write!(f, "Expected {expected} component labels; got: {found}")
            }
            DatasetError::Units(err) => {
                write!(f, "{err}")
            }
            // ---- Payload decoding ----
            DatasetError::ComponentCountMismatch { expected, found } => {
                write!(f, "Expected {expected} components; payload holds {found}.")
            }
            DatasetError::RaggedComponents { channel, expected, found } => {
                write!(
                    f,
                    "Component {channel} decodes to {found} samples; earlier components hold {expected}."
                )
            }
            DatasetError::OddComplexLength { channel, length } => {
                write!(
                    f,
                    "Component {channel} interleaves {length} values; complex data needs an even count."
                )
            }
            DatasetError::ByteLengthMismatch { width, length } => {
                write!(f, "{length} payload bytes is not a multiple of the {width}-byte sample width.")
            }
            DatasetError::UnevenChannelSplit { total, channels } => {
                write!(f, "{total} samples cannot be split evenly across {channels} components.")
            }
            DatasetError::GridSizeMismatch { points, grid } => {
                write!(f, "Each component holds {points} samples; the declared grid has {grid} points.")
            }
            DatasetError::Base64Decode { channel, detail } => {
                write!(f, "Component {channel} is not valid base64: {detail}")
            }
            DatasetError::InlinePayload { channel, detail } => {
                write!(f, "Component {channel} holds an invalid inline value: {detail}")
            }
            // ---- Encoding ----
            DatasetError::NonFiniteInline { channel } => {
                write!(
                    f,
                    "Component {channel} holds a non-finite sample; inline JSON cannot represent it."
                )
            }
        }
    }
}

impl From<UnitsError> for DatasetError {
    fn from(err: UnitsError) -> DatasetError {
        DatasetError::Units(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<DatasetError> for PyErr {
    fn from(err: DatasetError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
