//! model — the top-level aggregate and its serialization envelope.
//!
//! Purpose
//! -------
//! Implement [`DataModel`]: an ordered list of dimensions spanning a
//! sampling grid, an ordered list of datasets sampled on it, the Fourier
//! transform coupling the two, and the versioned JSON envelope the whole
//! structure travels in.
//!
//! Key behaviors
//! -------------
//! - Appends enforce the aggregate invariants eagerly: one sampling
//!   class across dimensions, and per-component sample counts equal to
//!   the grid size.
//! - `fft` transforms every dataset along one linear axis and swaps the
//!   axis with its reciprocal, atomically; buffers stay in natural DFT
//!   bin order while the swapped axis toggles its FFT-output-order flag.
//! - The envelope gates on version when reading and always writes the
//!   current one; raw payloads travel as in-memory byte maps beside the
//!   document.
//!
//! Invariants & assumptions
//! ------------------------
//! - Single-threaded mutation; failed operations leave the model exactly
//!   as it was.
//! - Warnings are values returned to the caller, never logged.
//!
//! Downstream usage
//! ----------------
//! - The crate root re-exports this module's surface; the Python
//!   bindings wrap [`DataModel`] end to end.
//!
//! Testing notes
//! -------------
//! - Transform numerics live in `fft` tests, aggregate invariants and
//!   atomicity in `datamodel`, envelope round trips in `wire`.

pub mod datamodel;
pub mod errors;
pub mod fft;
pub mod wire;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::datamodel::{DataModel, LATEST_VERSION, SUPPORTED_VERSIONS};
pub use self::errors::{ModelError, ModelResult};
pub use self::fft::dft_forward;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::datamodel::{DataModel, LATEST_VERSION, SUPPORTED_VERSIONS};
    pub use super::errors::{ModelError, ModelResult};
}
