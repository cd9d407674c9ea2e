//! csdm — the Core Scientific Dataset Model with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the model to Python as the `csdm` extension module. The crate
//! implements unit-aware quantities, sampled dimensions, typed
//! multi-component datasets, and the versioned JSON envelope that ties
//! them together.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`units`, `dimension`, `dataset`,
//!   `model`) as the public crate surface.
//! - Define the `CSDModel` `#[pyclass]` wrapper and the `#[pymodule]`
//!   initializer for the `csdm` Python extension when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All parsing, validation, and numerical work is implemented in the
//!   inner modules; this file performs only FFI glue and error mapping.
//! - The Python-visible methods mirror the signatures and invariants of
//!   their [`DataModel`] counterparts; non-fatal warnings cross the
//!   boundary as lists of rendered strings.
//!
//! Conventions
//! -----------
//! - Python callers hand dimension and dataset specifications across as
//!   JSON text and receive documents the same way; binary payloads
//!   travel as `dict[str, bytes]` sidecar maps.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - Python imports the compiled `csdm` module defined here; no
//!   pure-Python wrapper layer is required.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   the crate-level integration test; binding smoke tests live on the
//!   Python side.

pub mod dataset;
pub mod dimension;
pub mod model;
pub mod units;

#[cfg(feature = "python-bindings")]
use std::collections::HashMap;

#[cfg(feature = "python-bindings")]
use numpy::{Complex64, IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use crate::{
    dataset::spec::DatasetSpec,
    dimension::{kind::Dimension, spec::DimensionSpec},
    model::{DataModel, LATEST_VERSION, errors::ModelError},
    units::errors::QuantityNameWarning,
};

#[cfg(feature = "python-bindings")]
fn warning_messages<I>(warnings: I) -> Vec<String>
where
    I: IntoIterator<Item = QuantityNameWarning>,
{
    warnings.into_iter().map(|warning| warning.to_string()).collect()
}

/// CSDModel — Python-facing wrapper for the scientific dataset model.
///
/// Purpose
/// -------
/// Expose the [`DataModel`] API to Python callers while preserving the
/// core Rust invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Absorb complete documents (`loads`) or grow a model one variable at
///   a time from JSON specification text (`add_dimension`,
///   `add_dataset`).
/// - Emit documents plus their raw-payload sidecar map (`dumps`) and
///   derive conventional payload names (`assign_sidecar_names`).
/// - Run the Fourier transform over a chosen axis (`fft`) and hand
///   coordinates and sample buffers to numpy.
///
/// Parameters
/// ----------
/// Constructed from Python via `CSDModel()` for an empty model or the
/// `CSDModel.loads(text, sidecars=None)` factory for serialized
/// documents.
///
/// Fields
/// ------
/// - `inner`: [`DataModel`]
///   Rust-side aggregate holding the dimensions and datasets.
///
/// Invariants
/// ----------
/// - `inner` always satisfies the aggregate invariants documented on
///   [`DataModel`]; rejected operations raise `ValueError` and leave the
///   model untouched.
///
/// Performance
/// -----------
/// - Specification text is parsed once per call; coordinate and
///   component accessors allocate fresh numpy arrays on each access.
///
/// Notes
/// -----
/// - Native Rust callers should use [`DataModel`] directly; this type
///   exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "csdm")]
pub struct CSDModel {
    /// Underlying Rust DataModel.
    pub inner: DataModel,
}

#[cfg(feature = "python-bindings")]
impl CSDModel {
    fn dimension_ref(&self, index: usize) -> PyResult<&Dimension> {
        self.inner.dimension(index).ok_or_else(|| {
            ModelError::DimensionIndex { index, count: self.inner.dimensions().len() }.into()
        })
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CSDModel {
    /// An empty model at the current format version.
    #[new]
    pub fn new() -> CSDModel {
        CSDModel { inner: DataModel::new() }
    }

    /// Absorb a serialized document, returning the model and the
    /// non-fatal warnings produced while reading it.
    #[staticmethod]
    #[pyo3(
        text_signature = "(text, /, sidecars=None)",
        signature = (text, sidecars = None)
    )]
    pub fn loads(
        text: &str,
        sidecars: Option<HashMap<String, Vec<u8>>>,
    ) -> PyResult<(CSDModel, Vec<String>)> {
        let sidecars = sidecars.unwrap_or_default();
        let (inner, warnings) = DataModel::from_json_str(text, &sidecars)?;
        Ok((CSDModel { inner }, warning_messages(warnings)))
    }

    /// Emit the document text plus the payload map for raw datasets.
    pub fn dumps(&self) -> PyResult<(String, HashMap<String, Vec<u8>>)> {
        Ok(self.inner.to_json_string()?)
    }

    /// Append a dimension from JSON specification text.
    pub fn add_dimension(&mut self, spec: &str) -> PyResult<Vec<String>> {
        let spec: DimensionSpec = serde_json::from_str(spec).map_err(|err| {
            PyValueError::new_err(format!("invalid dimension specification: {err}"))
        })?;
        let warnings = self.inner.add_dimension(&spec)?;
        Ok(warning_messages(warnings))
    }

    /// Append a dataset from JSON specification text; `payload` carries
    /// the external bytes for raw-encoded specifications.
    #[pyo3(
        text_signature = "(self, spec, /, payload=None)",
        signature = (spec, payload = None)
    )]
    pub fn add_dataset(&mut self, spec: &str, payload: Option<Vec<u8>>) -> PyResult<Vec<String>> {
        let spec: DatasetSpec = serde_json::from_str(spec).map_err(|err| {
            PyValueError::new_err(format!("invalid dataset specification: {err}"))
        })?;
        let warning = self.inner.add_dataset(&spec, payload.as_deref())?;
        Ok(warning_messages(warning))
    }

    /// Fourier-transform every dataset along one linear axis and swap
    /// the axis with its reciprocal.
    pub fn fft(&mut self, dimension_index: usize) -> PyResult<()> {
        self.inner.fft(dimension_index)?;
        Ok(())
    }

    /// Derive conventional payload names for raw datasets.
    #[pyo3(
        text_signature = "(self, base, /, shared_directory=False)",
        signature = (base, shared_directory = false)
    )]
    pub fn assign_sidecar_names(&mut self, base: &str, shared_directory: bool) {
        self.inner.assign_sidecar_names(base, shared_directory);
    }

    /// Displayed coordinates of one quantitative dimension.
    pub fn coordinates<'py>(
        &self,
        py: Python<'py>,
        dimension_index: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let coordinates = self.dimension_ref(dimension_index)?.coordinates()?;
        Ok(coordinates.to_owned().into_pyarray(py))
    }

    /// Category labels of one non-quantitative dimension.
    pub fn labels(&self, dimension_index: usize) -> PyResult<Vec<String>> {
        let labels = self.dimension_ref(dimension_index)?.labels()?;
        Ok(labels.into_iter().map(str::to_string).collect())
    }

    /// The plot-ready axis label of one dimension.
    pub fn axis_label(&self, dimension_index: usize) -> PyResult<String> {
        Ok(self.dimension_ref(dimension_index)?.axis_label())
    }

    /// One dataset's sample buffer as a complex128 numpy array, shaped
    /// `(components, samples)` regardless of the stored numeric type.
    pub fn components<'py>(
        &self,
        py: Python<'py>,
        dataset_index: usize,
    ) -> PyResult<Bound<'py, PyArray2<Complex64>>> {
        let dataset = self.inner.dataset(dataset_index).ok_or_else(|| {
            PyValueError::new_err(format!("dataset index {dataset_index} is out of range"))
        })?;
        Ok(dataset.components().to_complex128().into_pyarray(py))
    }

    /// The version string the model was read with.
    #[getter]
    pub fn version(&self) -> String {
        self.inner.version().to_string()
    }

    /// Dimension counts in declared order.
    #[getter]
    pub fn shape(&self) -> Vec<usize> {
        self.inner.shape()
    }

    #[getter]
    pub fn dimension_count(&self) -> usize {
        self.inner.dimensions().len()
    }

    #[getter]
    pub fn dataset_count(&self) -> usize {
        self.inner.datasets().len()
    }
}

/// csdm — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `csdm` Python module: the [`CSDModel`] class plus the
/// format-version constant.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn csdm<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<CSDModel>()?;
    m.add("LATEST_VERSION", LATEST_VERSION)?;
    Ok(())
}
