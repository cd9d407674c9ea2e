//! units::errors — error types for quantity parsing and unit consistency.
//!
//! Purpose
//! -------
//! Define the error enum, result alias, and non-fatal warning type shared by
//! the quantity parser/formatter and the unit-consistency helpers. Parse
//! failures carry byte positions into the substituted input string so callers
//! can point at the offending token instead of guessing.
//!
//! Key behaviors
//! -------------
//! - Define [`UnitsResult`] and [`UnitsError`] as the canonical result and
//!   error types for everything under `units`.
//! - Attach human-readable `Display` messages embedding the offending
//!   literal, symbol, or physical type.
//! - Define [`QuantityNameWarning`], the only non-fatal outcome in this
//!   stack: a supplied quantity name accepted against a unit whose physical
//!   type is unknown.
//! - Convert to Python `ValueError` at the binding boundary when the
//!   `python-bindings` feature is enabled.
//!
//! Conventions
//! -----------
//! - Positions are 0-based byte offsets into the input *after* the fixed
//!   Unicode→ASCII substitutions have been applied.
//! - Warnings are plain returned values; this crate performs no logging.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for quantity parsing and unit-consistency operations.
pub type UnitsResult<T> = Result<T, UnitsError>;

/// Unified error type for quantity parsing, formatting, and unit checks.
///
/// Parse-side variants carry the byte position of the offending token in the
/// substituted input; consistency-side variants carry the physical types or
/// unit strings that failed to line up.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitsError {
    // ---- Tokenization / numeric grammar ----
    /// The input contains no numeric prefix and no unit tokens.
    EmptyExpression,

    /// A character outside the token alphabet (digits, letters, `_`, `.`,
    /// `^`, `*`, `/`, `-`, whitespace) was encountered.
    UnexpectedCharacter { position: usize, character: char },

    /// A numeric literal failed to parse as a finite float.
    InvalidNumber { position: usize, literal: String },

    /// An exponent after `^` is not a plain (optionally signed) integer.
    InvalidExponent { position: usize, literal: String },

    /// A token appeared where the grammar does not allow it.
    UnexpectedToken { position: usize, found: String },

    /// The evaluated numeric prefix is NaN or ±inf.
    NonFiniteMagnitude { value: f64 },

    // ---- Symbol resolution ----
    /// A unit token resolved to no table entry, with or without an SI prefix.
    UnknownUnit { symbol: String },

    // ---- Consistency ----
    /// Two quantities/units do not share a physical type.
    UnitMismatch { expected: String, found: String },

    /// A supplied quantity name disagrees with the unit's physical type.
    QuantityNameMismatch { supplied: String, physical_type: String },
}

impl std::error::Error for UnitsError {}

impl std::fmt::Display for UnitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Tokenization / numeric grammar ----
            UnitsError::EmptyExpression => {
                write!(f, "Quantity string is empty.")
            }
            UnitsError::UnexpectedCharacter { position, character } => {
                write!(f, "Unexpected character {character:?} at byte {position}.")
            }
            UnitsError::InvalidNumber { position, literal } => {
                write!(f, "Invalid numeric literal {literal:?} at byte {position}.")
            }
            UnitsError::InvalidExponent { position, literal } => {
                write!(
                    f,
                    "Invalid exponent {literal:?} at byte {position}; expected an integer."
                )
            }
            UnitsError::UnexpectedToken { position, found } => {
                write!(f, "Unexpected token {found:?} at byte {position}.")
            }
            UnitsError::NonFiniteMagnitude { value } => {
                write!(f, "Numeric prefix evaluated to a non-finite value: {value}")
            }
            // ---- Symbol resolution ----
            UnitsError::UnknownUnit { symbol } => {
                write!(f, "Unknown unit symbol {symbol:?}.")
            }
            // ---- Consistency ----
            UnitsError::UnitMismatch { expected, found } => {
                write!(f, "Unit mismatch: expected physical type {expected:?}, got {found:?}.")
            }
            UnitsError::QuantityNameMismatch { supplied, physical_type } => {
                write!(
                    f,
                    "Quantity name {supplied:?} does not match the unit's physical type {physical_type:?}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<UnitsError> for PyErr {
    fn from(err: UnitsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Non-fatal outcome of quantity-name resolution against a unit whose
/// physical type is unknown: the supplied name is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityNameWarning {
    /// The caller-supplied name that was accepted without verification.
    pub supplied: String,
}

impl std::fmt::Display for QuantityNameWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unit has an unknown physical type; keeping supplied quantity name {:?}.",
            self.supplied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for UnitsError variants with payloads.
    // - The warning type's message content.
    //
    // They intentionally DO NOT cover:
    // - The `From<UnitsError> for PyErr` conversion, which requires linking
    //   against the Python C API and is exercised from Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that position-carrying parse errors embed both the byte offset
    // and the offending literal in their `Display` output.
    //
    // Given
    // -----
    // - An `InvalidNumber` at byte 3 with literal "1.2.3".
    //
    // Expect
    // ------
    // - The message contains "3" and "1.2.3".
    fn units_error_invalid_number_includes_position_and_literal() {
        // Arrange
        let err = UnitsError::InvalidNumber { position: 3, literal: "1.2.3".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('3'), "message should include the byte offset.\nGot: {msg}");
        assert!(msg.contains("1.2.3"), "message should include the literal.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UnitMismatch` names both physical types.
    //
    // Given
    // -----
    // - An expected type "frequency" and a found type "length".
    //
    // Expect
    // ------
    // - The message contains both strings.
    fn units_error_unit_mismatch_names_both_physical_types() {
        // Arrange
        let err = UnitsError::UnitMismatch {
            expected: "frequency".to_string(),
            found: "length".to_string(),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains("frequency") && msg.contains("length"),
            "message should include both physical types.\nGot: {msg}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the warning's message carries the supplied name.
    //
    // Given
    // -----
    // - A `QuantityNameWarning` with a custom name.
    //
    // Expect
    // ------
    // - The message contains the name.
    fn quantity_name_warning_includes_supplied_name() {
        // Arrange
        let warning = QuantityNameWarning { supplied: "chemical shift".to_string() };

        // Act
        let msg = warning.to_string();

        // Assert
        assert!(
            msg.contains("chemical shift"),
            "warning message should include the supplied name.\nGot: {msg}"
        );
    }
}
