//! dimension::errors — error and warning types for the dimension stack.
//!
//! Purpose
//! -------
//! Define [`DimensionError`], the [`DimensionResult`] alias, and the
//! non-fatal [`TruncationWarning`] returned when an arbitrary grid shrinks.
//! Unit-level failures bubble up through a `From<UnitsError>` wrapper so
//! constructors can use `?` on conversion and consistency checks.
//!
//! Conventions
//! -----------
//! - `UnsupportedOperation` names both the operation and the dimension kind
//!   so messages stay meaningful without extra context.
//! - Warnings are plain returned values; nothing is logged.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::units::errors::UnitsError;

/// Result alias for dimension construction and mutation.
pub type DimensionResult<T> = Result<T, DimensionError>;

/// Unified error type for the three dimension variants.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionError {
    // ---- Construction ----
    /// A linear grid needs at least one point.
    ZeroCount,

    /// The sampling interval must have a strictly positive magnitude.
    NonPositiveInterval { value: f64 },

    /// An arbitrary grid needs at least one value.
    EmptyValues,

    /// Arbitrary-grid values must be supplied strictly ascending.
    UnsortedValues { index: usize },

    /// A supplied reciprocal coordinate sequence must match the grid length.
    ReciprocalLengthMismatch { expected: usize, found: usize },

    /// A unit parse/conversion/consistency failure from the units stack.
    Units(UnitsError),

    // ---- Specification dispatch ----
    /// The specification mixes keys from more than one dimension variant.
    AmbiguousSpec { detail: &'static str },

    /// The specification selects no variant, or a selected variant is
    /// missing a required key.
    MissingField { field: &'static str },

    /// The sampling-type keyword is not `grid` or `scatter`.
    InvalidSamplingType { keyword: String },

    // ---- Mutation ----
    /// Growing an arbitrary grid is not possible; only truncation is.
    CountIncrease { requested: usize, current: usize },

    /// `origin_offset + reference_offset` is zero, so coordinates cannot be
    /// made dimensionless.
    DivisionByZero { label: String },

    /// The operation has no meaning for this dimension kind.
    UnsupportedOperation { operation: &'static str, kind: &'static str },
}

impl std::error::Error for DimensionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimensionError::Units(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DimensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            DimensionError::ZeroCount => {
                write!(f, "A linear dimension requires count >= 1.")
            }
            DimensionError::NonPositiveInterval { value } => {
                write!(f, "Sampling interval must be > 0; got: {value}")
            }
            DimensionError::EmptyValues => {
                write!(f, "An arbitrary grid requires at least one value.")
            }
            DimensionError::UnsortedValues { index } => {
                write!(f, "Arbitrary-grid values must ascend strictly; violation at index {index}.")
            }
            DimensionError::ReciprocalLengthMismatch { expected, found } => {
                write!(
                    f,
                    "Reciprocal coordinate sequence has {found} values; expected {expected} to match the grid."
                )
            }
            DimensionError::Units(err) => {
                write!(f, "{err}")
            }
            // ---- Specification dispatch ----
            DimensionError::AmbiguousSpec { detail } => {
                write!(f, "Dimension specification is ambiguous: {detail}.")
            }
            DimensionError::MissingField { field } => {
                write!(f, "Dimension specification is missing {field}.")
            }
            DimensionError::InvalidSamplingType { keyword } => {
                write!(f, "Unknown sampling type {keyword:?}; expected \"grid\" or \"scatter\".")
            }
            // ---- Mutation ----
            DimensionError::CountIncrease { requested, current } => {
                write!(
                    f,
                    "Cannot grow an arbitrary grid from {current} to {requested} points; only truncation is supported."
                )
            }
            DimensionError::DivisionByZero { label } => {
                write!(
                    f,
                    "Cannot make dimension {label:?} dimensionless: origin_offset + reference_offset is zero."
                )
            }
            DimensionError::UnsupportedOperation { operation, kind } => {
                write!(f, "Operation {operation:?} is not supported on a {kind} dimension.")
            }
        }
    }
}

impl From<UnitsError> for DimensionError {
    fn from(err: UnitsError) -> DimensionError {
        DimensionError::Units(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<DimensionError> for PyErr {
    fn from(err: DimensionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Non-fatal outcome of shrinking an arbitrary grid: the values kept are a
/// prefix of the originals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationWarning {
    pub from: usize,
    pub to: usize,
}

impl std::fmt::Display for TruncationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid truncated from {} to {} points; trailing values dropped.", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` payload embedding for mutation errors and the warning.
    // - The `From<UnitsError>` wrapper and its `source` chain.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `CountIncrease` names both the requested and current
    // counts.
    //
    // Given
    // -----
    // - A request to grow from 5 to 9 points.
    //
    // Expect
    // ------
    // - The message contains "9" and "5".
    fn dimension_error_count_increase_names_both_counts() {
        // Arrange
        let err = DimensionError::CountIncrease { requested: 9, current: 5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('9') && msg.contains('5'), "expected both counts in {msg:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the units wrapper carries the inner message and exposes the
    // inner error as its source.
    //
    // Given
    // -----
    // - A wrapped `UnknownUnit` error.
    //
    // Expect
    // ------
    // - Display mentions the symbol; `source()` is Some.
    fn dimension_error_units_wrapper_preserves_inner_error() {
        // Arrange
        let err = DimensionError::from(UnitsError::UnknownUnit { symbol: "floop".to_string() });

        // Act / Assert
        assert!(err.to_string().contains("floop"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    // Purpose
    // -------
    // Verify the truncation warning's message names both counts.
    //
    // Given
    // -----
    // - A truncation from 10 to 4 points.
    //
    // Expect
    // ------
    // - The message contains "10" and "4".
    fn truncation_warning_names_both_counts() {
        // Arrange
        let warning = TruncationWarning { from: 10, to: 4 };

        // Act
        let msg = warning.to_string();

        // Assert
        assert!(msg.contains("10") && msg.contains('4'), "expected both counts in {msg:?}");
    }
}
