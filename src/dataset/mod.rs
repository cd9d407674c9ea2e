//! dataset — uncontrolled variables sampled on the dimension grid.
//!
//! Purpose
//! -------
//! Implement the dataset abstraction: a typed channel-major sample buffer
//! ([`ComponentsArray`]) with physical metadata, the closed keyword
//! vocabularies it is described by, and bit-exact codecs for the three
//! payload encodings (`none`, `base64`, `raw`).
//!
//! Key behaviors
//! -------------
//! - Keyword parsing and payload decoding at absorption with eager
//!   validation ([`Dataset::from_spec`]): the payload carrier must match
//!   the declared encoding, channels must match the dataset type, and
//!   quantity names resolve against the unit's physical type.
//! - Little-endian wire codecs with complex interleaving and channel-major
//!   raw splitting ([`core::codec`]); round trips are the identity for all
//!   thirteen numeric types.
//! - Minimal wire emission: keys holding derivable defaults are dropped,
//!   and raw payload bytes are returned beside the specification so
//!   callers own the sidecar write.
//!
//! Invariants & assumptions
//! ------------------------
//! - A dataset's buffer always holds `dataset_type.channel_count()`
//!   channels of one shared length; labels pad to the same count.
//! - The numeric type derives from the buffer, so transforms that widen
//!   the data update it automatically.
//!
//! Downstream usage
//! ----------------
//! - The model layer appends [`Dataset`] values, validates their sample
//!   counts against the declared grid, and swaps buffers through
//!   [`Dataset::replace_components`] when transforming.
//!
//! Testing notes
//! -------------
//! - Byte layouts and codec failures are pinned in `core::codec` tests;
//!   keyword vocabularies in their own submodules; absorption, dispatch,
//!   and emission in `dataset`.

pub mod core;
pub mod dataset;
pub mod errors;
pub mod spec;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{ComponentsArray, DatasetType, Encoding, NumericType};
pub use self::dataset::{Dataset, DatasetOptions};
pub use self::errors::{DatasetError, DatasetResult};
pub use self::spec::{DatasetSpec, WireComponents};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::core::{ComponentsArray, DatasetType, Encoding, NumericType};
    pub use super::dataset::{Dataset, DatasetOptions};
    pub use super::errors::{DatasetError, DatasetResult};
    pub use super::spec::DatasetSpec;
}
