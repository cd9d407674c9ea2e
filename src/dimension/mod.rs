//! dimension — controlled-variable axes with three sampling laws.
//!
//! Purpose
//! -------
//! Implement the dimension abstraction: uniformly sampled linear grids
//! with an in-place-swappable Fourier dual, arbitrarily sampled monotonic
//! grids, and non-quantitative label sequences, unified behind the closed
//! [`Dimension`] enum with wire-specification dispatch.
//!
//! Key behaviors
//! -------------
//! - Coordinate generation from stored fields with FFT bin ordering,
//!   offset subtraction, reversal, and dimensionless display ([`core`]).
//! - `to_reciprocal` on linear grids: a field-complete involution that
//!   toggles FFT output order and re-derives cached coordinates.
//! - Specification absorption with eager validation, quantity-name
//!   resolution, and variant dispatch by key presence ([`kind`], [`spec`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constructor validates eagerly; mutators stage replacement state
//!   and commit in one assignment, so failures never leave mixed state.
//! - Non-fatal conditions (grid truncation, unverifiable quantity names)
//!   are returned as typed warning values, never logged.
//!
//! Downstream usage
//! ----------------
//! - The model layer appends [`Dimension`] values, drives `to_reciprocal`
//!   from its fft operation, and uses [`crate::dimension::SamplingType`]
//!   for the grid/scatter homogeneity invariant.
//!
//! Testing notes
//! -------------
//! - Coordinate math is pinned in `core` submodule tests; dispatch,
//!   round-trip, and unsupported-operation behavior in `kind`; wire-shape
//!   details in `spec`.

pub mod core;
pub mod errors;
pub mod kind;
pub mod spec;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    LabeledDimension, LabeledOptions, LinearDimension, LinearOptions, MonotonicDimension,
    MonotonicOptions, ReciprocalOptions, ReciprocalParams, SamplingType,
};
pub use self::errors::{DimensionError, DimensionResult, TruncationWarning};
pub use self::kind::Dimension;
pub use self::spec::{DimensionSpec, ReciprocalSpec};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::core::{
        LabeledDimension, LinearDimension, LinearOptions, MonotonicDimension, MonotonicOptions,
        SamplingType,
    };
    pub use super::errors::{DimensionError, DimensionResult, TruncationWarning};
    pub use super::kind::Dimension;
    pub use super::spec::DimensionSpec;
}
