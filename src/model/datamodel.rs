//! model::datamodel — the composition root tying axes to data.
//!
//! Purpose
//! -------
//! Hold an ordered list of [`Dimension`]s spanning a sampling grid and an
//! ordered list of [`Dataset`]s sampled on it, enforce the aggregate
//! invariants on every append, and implement the Fourier transform that
//! couples one axis to every dataset.
//!
//! Key behaviors
//! -------------
//! - Appends validate eagerly: a dimension whose sampling class differs
//!   from the model's is rejected without committing, and a dataset whose
//!   per-component sample count disagrees with the declared grid never
//!   enters the list.
//! - `fft` transforms every dataset along one linear axis and swaps that
//!   axis with its reciprocal, atomically: all buffers validate and all
//!   replacement state is staged before anything mutates.
//!
//! Invariants & assumptions
//! ------------------------
//! - All dimensions share one sampling class (grid or scatter).
//! - Appended datasets hold `grid_size` samples per component; mutators
//!   reachable through `dimension_mut`/`dataset_mut` can desynchronize
//!   counts, which the next `fft` rejects up front.
//!
//! Conventions
//! -----------
//! - Transform convention: forward DFT sign `e^{-2πi}`; transformed
//!   buffers stay in natural DFT bin order, which the swapped axis's
//!   toggled FFT-output-order flag makes the displayed coordinate order.
//!   The referencing phase `exp(+2πi·reference_offset·cs)` is evaluated
//!   on the conjugate values `cs` aligned to the same bin order.
//! - Buffers are transformed in storage order; the `reverse` flag is a
//!   display-layer property and does not reorder data.
//!
//! Downstream usage
//! ----------------
//! - The JSON envelope absorbs and emits models through the methods in
//!   [`crate::model::wire`]; the Python surface wraps this type.

use std::f64::consts::PI;

use ndarray::{Array1, Axis, Ix2, IxDyn};
use num_complex::Complex64;

use crate::dataset::core::buffer::ComponentsArray;
use crate::dataset::core::codec::reshape_complex;
use crate::dataset::dataset::Dataset;
use crate::dataset::spec::DatasetSpec;
use crate::dimension::core::indexes::{fft_output_indexes, natural_indexes};
use crate::dimension::errors::DimensionError;
use crate::dimension::kind::Dimension;
use crate::dimension::spec::DimensionSpec;
use crate::model::errors::{ModelError, ModelResult};
use crate::model::fft::transform_lanes;
use crate::units::errors::QuantityNameWarning;

/// Wire-format versions this crate reads.
pub const SUPPORTED_VERSIONS: [&str; 4] = ["0.0.9", "0.0.10", "0.0.11", "0.0.12"];

/// The wire-format version written on serialization.
pub const LATEST_VERSION: &str = "0.0.12";

/// An ordered set of controlled variables (dimensions) and the
/// uncontrolled variables (datasets) sampled on their grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    version: String,
    dimensions: Vec<Dimension>,
    datasets: Vec<Dataset>,
}

impl Default for DataModel {
    fn default() -> DataModel {
        DataModel::new()
    }
}

impl DataModel {
    /// An empty model at the current wire-format version.
    pub fn new() -> DataModel {
        DataModel::with_version(LATEST_VERSION.to_string())
    }

    pub(crate) fn with_version(version: String) -> DataModel {
        DataModel { version, dimensions: Vec::new(), datasets: Vec::new() }
    }

    /// Append a built dimension, enforcing sampling-class homogeneity.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::MixedSamplingType`] when the appended dimension's
    ///   class (grid or scatter) differs from the model's; nothing is
    ///   committed.
    pub fn push_dimension(&mut self, dimension: Dimension) -> ModelResult<()> {
        let appended = dimension.sampling_type();
        if let Some(existing) = self
            .dimensions
            .iter()
            .map(Dimension::sampling_type)
            .find(|class| *class != appended)
        {
            return Err(ModelError::MixedSamplingType {
                existing: existing.keyword(),
                appended: appended.keyword(),
            });
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    /// Absorb a dimension specification and append the result.
    ///
    /// Returns
    /// -------
    /// - The quantity-name warnings produced while resolving the
    ///   specification's `quantity` keys (forward and reciprocal side).
    pub fn add_dimension(&mut self, spec: &DimensionSpec) -> ModelResult<Vec<QuantityNameWarning>> {
        let (dimension, warnings) = Dimension::from_spec(spec)?;
        self.push_dimension(dimension)?;
        Ok(warnings)
    }

    /// Append a built dataset, validating its sample count against the
    /// declared grid.
    ///
    /// Dimensions must be appended first: an empty model declares a
    /// one-point grid.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::GridSizeMismatch`] when the dataset's
    ///   per-component sample count is not the product of the dimension
    ///   counts.
    pub fn push_dataset(&mut self, dataset: Dataset) -> ModelResult<()> {
        let grid = self.grid_size();
        let points = dataset.points_per_channel();
        if points != grid {
            return Err(ModelError::GridSizeMismatch {
                dataset: self.datasets.len(),
                points,
                grid,
            });
        }
        self.datasets.push(dataset);
        Ok(())
    }

    /// Absorb a dataset specification and append the result.
    ///
    /// `raw_payload` carries the external blob for raw-encoded
    /// specifications, as with [`Dataset::from_spec`].
    pub fn add_dataset(
        &mut self,
        spec: &DatasetSpec,
        raw_payload: Option<&[u8]>,
    ) -> ModelResult<Option<QuantityNameWarning>> {
        let (dataset, warning) = Dataset::from_spec(spec, raw_payload)?;
        self.push_dataset(dataset)?;
        Ok(warning)
    }

    /// The version string this model was read with; models built in
    /// memory report the current version. Serialization always writes
    /// [`LATEST_VERSION`].
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dimension(&self, index: usize) -> Option<&Dimension> {
        self.dimensions.get(index)
    }

    /// Mutable axis access for per-dimension operations (`set_count`,
    /// `make_dimensionless`, `to_reciprocal`). Count changes desynchronize
    /// attached datasets until their buffers are replaced.
    pub fn dimension_mut(&mut self, index: usize) -> Option<&mut Dimension> {
        self.dimensions.get_mut(index)
    }

    pub fn dataset(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }

    pub fn dataset_mut(&mut self, index: usize) -> Option<&mut Dataset> {
        self.datasets.get_mut(index)
    }

    /// The declared grid shape: dimension counts in declared order.
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(Dimension::count).collect()
    }

    fn grid_size(&self) -> usize {
        self.dimensions.iter().map(Dimension::count).product()
    }

    /// Fourier-transform every dataset along one axis and swap that axis
    /// with its reciprocal.
    ///
    /// Key behaviors
    /// -------------
    /// - The transform runs along storage axis `D - dimension_index` of
    ///   the `(channels, *grid)` layout, the reverse-declared-order
    ///   position of the target dimension.
    /// - Each lane is DFT'd (forward sign, natural bin order) and
    ///   multiplied by `exp(+2πi·reference_offset·cs)`, where
    ///   `cs = reciprocal_coordinates + reciprocal reference offset`
    ///   aligned to the bin order; buffers widen to complex128.
    /// - The dimension swap toggles FFT output order, so the new
    ///   displayed coordinates match the stored bin order.
    ///
    /// Edge cases
    /// ----------
    /// - Fails atomically: every dataset's buffer is validated against
    ///   the grid and the swapped dimension is staged before any state
    ///   mutates.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::DimensionIndex`] for an out-of-range index.
    /// - [`DimensionError::UnsupportedOperation`] (wrapped) when the
    ///   target dimension is not a linear grid.
    /// - [`ModelError::GridSizeMismatch`] when any dataset's sample count
    ///   disagrees with the declared grid.
    pub fn fft(&mut self, dimension_index: usize) -> ModelResult<()> {
        let count = self.dimensions.len();
        let linear = match self.dimensions.get(dimension_index) {
            None => return Err(ModelError::DimensionIndex { index: dimension_index, count }),
            Some(Dimension::Linear(linear)) => linear,
            Some(other) => {
                return Err(DimensionError::UnsupportedOperation {
                    operation: "fft",
                    kind: other.kind(),
                }
                .into());
            }
        };

        let grid = self.grid_size();
        for (index, dataset) in self.datasets.iter().enumerate() {
            let points = dataset.points_per_channel();
            if points != grid {
                return Err(ModelError::GridSizeMismatch { dataset: index, points, grid });
            }
        }

        // Conjugate values aligned to natural DFT bin order: a naturally
        // displayed axis has centered reciprocal coordinates, whose bin
        // alignment is the FFT-bin index permutation; an FFT-ordered axis
        // has natural ones. The reciprocal reference offset cancels
        // between the coordinate subtraction and its re-addition in cs.
        let points = linear.count();
        let bins = if linear.fft_output_order() {
            natural_indexes(points)
        } else {
            fft_output_indexes(points)
        };
        let reciprocal_interval = linear.reciprocal().interval();
        let offset = linear
            .reference_offset()
            .to(&reciprocal_interval.unit().recip())
            .map_err(DimensionError::from)?
            .magnitude();
        let step = reciprocal_interval.magnitude();
        let phase: Array1<Complex64> = bins
            .iter()
            .map(|&bin| Complex64::from_polar(1.0, 2.0 * PI * offset * bin as f64 * step))
            .collect();

        // Stage the swapped axis first: a dual-side failure (for example
        // a zero dimensionless divisor) must abort before any dataset
        // mutates.
        let mut swapped = self.dimensions[dimension_index].clone();
        swapped.to_reciprocal()?;

        let axis = Axis(count - dimension_index);
        let shape = self.shape();
        let mut staged: Vec<ComponentsArray> = Vec::with_capacity(self.datasets.len());
        for dataset in &self.datasets {
            let wide = dataset.components().to_complex128();
            let (channels, samples) = wide.dim();
            let mut shaped = reshape_complex(wide, &shape)?;
            transform_lanes(&mut shaped, axis, &phase);
            let flat = shaped
                .into_shape_with_order(IxDyn(&[channels, samples]))
                .unwrap_or_else(|_| unreachable!("element count unchanged by the transform"))
                .into_dimensionality::<Ix2>()
                .unwrap_or_else(|_| unreachable!("two-axis shape built above"));
            staged.push(ComponentsArray::Complex128(flat));
        }

        for (dataset, buffer) in self.datasets.iter_mut().zip(staged) {
            dataset
                .replace_components(buffer)
                .unwrap_or_else(|_| unreachable!("channel count preserved by the transform"));
        }
        self.dimensions[dimension_index] = swapped;
        Ok(())
    }
}
