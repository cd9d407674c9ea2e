//! model::errors — error types for the composition root.
//!
//! Purpose
//! -------
//! Define [`ModelError`] and the [`ModelResult`] alias. Failures from the
//! dimension and dataset stacks bubble up through `From` wrappers so model
//! operations can use `?` across layer boundaries; the variants defined
//! here cover the concerns only the aggregate can check (version gate,
//! sampling-class homogeneity, grid-size consistency, JSON envelope).
//!
//! Conventions
//! -----------
//! - `serde_json` failures are carried as their rendered message, keeping
//!   the enum cloneable and comparable like every other error in the
//!   crate.
//! - Index-style variants name both the offending value and the bound so
//!   messages stay meaningful without extra context.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::dataset::errors::DatasetError;
use crate::dimension::errors::DimensionError;

/// Result alias for model construction, mutation, and (de)serialization.
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for the data model and its JSON envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Envelope ----
    /// The file's version string is outside the known-compatible set.
    UnsupportedVersion { version: String },

    /// A `serde_json` failure, carried as its rendered message.
    Json { detail: String },

    // ---- Aggregate invariants ----
    /// Grid-sampled and scatter-sampled dimensions cannot mix in one model.
    MixedSamplingType { existing: &'static str, appended: &'static str },

    /// A dataset's per-component sample count disagrees with the declared
    /// grid.
    GridSizeMismatch { dataset: usize, points: usize, grid: usize },

    /// A dimension index beyond the model's dimension list.
    DimensionIndex { index: usize, count: usize },

    // ---- Wrapped stacks ----
    /// A failure from the dimension stack.
    Dimension(DimensionError),

    /// A failure from the dataset stack.
    Dataset(DatasetError),
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Dimension(err) => Some(err),
            ModelError::Dataset(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Envelope ----
            ModelError::UnsupportedVersion { version } => {
                write!(
                    f,
                    "Unsupported CSDM version {version:?}; supported versions are 0.0.9 through 0.0.12."
                )
            }
            ModelError::Json { detail } => {
                write!(f, "JSON envelope error: {detail}")
            }
            // ---- Aggregate invariants ----
            ModelError::MixedSamplingType { existing, appended } => {
                write!(
                    f,
                    "Cannot append a {appended}-sampled dimension to a {existing}-sampled model."
                )
            }
            ModelError::GridSizeMismatch { dataset, points, grid } => {
                write!(
                    f,
                    "Dataset {dataset} holds {points} samples per component; the declared grid has {grid} points."
                )
            }
            ModelError::DimensionIndex { index, count } => {
                write!(
                    f,
                    "Dimension index {index} is out of range for a model with {count} dimensions."
                )
            }
            // ---- Wrapped stacks ----
            ModelError::Dimension(err) => {
                write!(f, "{err}")
            }
            ModelError::Dataset(err) => {
                write!(f, "{err}")
            }
        }
    }
}

impl From<DimensionError> for ModelError {
    fn from(err: DimensionError) -> ModelError {
        ModelError::Dimension(err)
    }
}

impl From<DatasetError> for ModelError {
    fn from(err: DatasetError) -> ModelError {
        ModelError::Dataset(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> ModelError {
        ModelError::Json { detail: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` payload embedding for the aggregate-invariant variants.
    // - The `From` wrappers and their `source` chains.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the grid-size message names the dataset, its sample count,
    // and the grid size.
    //
    // Given
    // -----
    // - Dataset 2 with 12 samples against a 16-point grid.
    //
    // Expect
    // ------
    // - The message contains "2", "12", and "16".
    fn model_error_grid_size_mismatch_names_all_three_counts() {
        // Arrange
        let err = ModelError::GridSizeMismatch { dataset: 2, points: 12, grid: 16 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains('2') && msg.contains("12") && msg.contains("16"),
            "expected all three counts in {msg:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the stack wrappers carry the inner message and expose the
    // inner error as their source.
    //
    // Given
    // -----
    // - A wrapped dimension dispatch error and a wrapped dataset keyword
    //   error.
    //
    // Expect
    // ------
    // - Display matches the inner message; `source()` is Some for both.
    fn model_error_wrappers_preserve_inner_errors() {
        // Arrange
        let dimension =
            ModelError::from(DimensionError::MissingField { field: "number_of_points" });
        let dataset =
            ModelError::from(DatasetError::InvalidNumericType { keyword: "float128".to_string() });

        // Act / Assert
        assert!(dimension.to_string().contains("number_of_points"));
        assert!(dataset.to_string().contains("float128"));
        assert!(std::error::Error::source(&dimension).is_some());
        assert!(std::error::Error::source(&dataset).is_some());
    }
}
