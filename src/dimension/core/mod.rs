//! core — the three dimension variants and their coordinate math.
//!
//! Purpose
//! -------
//! Collect the concrete dimension implementations behind the
//! [`crate::dimension::Dimension`] enum: uniformly sampled linear grids
//! with a swappable Fourier dual ([`LinearDimension`]), arbitrarily
//! sampled monotonic grids ([`MonotonicDimension`]), and non-quantitative
//! label sequences ([`LabeledDimension`]), plus the pure index-order
//! helpers they share.
//!
//! Key behaviors
//! -------------
//! - Generate displayed coordinates from stored fields: index order
//!   (natural, FFT bin, or centered via [`indexes`]), interval scaling,
//!   offset subtraction, reversal, and dimensionless ratios.
//! - Swap a linear dimension with its reciprocal in place
//!   ([`LinearDimension::to_reciprocal`]) as a field-complete involution.
//! - Enforce the per-variant resize rules: linear grids resize freely,
//!   monotonic and labeled grids only truncate (returning a
//!   [`crate::dimension::TruncationWarning`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Constructors validate eagerly; a successfully built dimension always
//!   has consistent units, a positive point count, and cached coordinates
//!   matching its fields.
//! - Mutators stage the complete replacement state before committing, so
//!   errors leave the value untouched.
//!
//! Conventions
//! -----------
//! - Coordinate magnitudes are expressed in the interval's (or first
//!   value's) unit; callers needing other units convert through
//!   [`crate::units::Quantity`].
//! - This module avoids I/O and logging; it operates purely on `ndarray`
//!   containers and scalar values. Error conditions are reported via
//!   `DimensionResult`, warnings as returned values.

pub mod indexes;
pub mod labeled;
pub mod linear;
pub mod monotonic;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::indexes::{centered_indexes, fft_output_indexes, natural_indexes};
pub use self::labeled::{LabeledDimension, LabeledOptions};
pub use self::linear::{LinearDimension, LinearOptions, ReciprocalOptions, ReciprocalParams};
pub use self::monotonic::{MonotonicDimension, MonotonicOptions, SamplingType};
