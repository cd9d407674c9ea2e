//! core — typed component storage and its wire codecs.
//!
//! Purpose
//! -------
//! Collect the value-level machinery behind [`crate::dataset::Dataset`]:
//! the numeric-type and dataset-type vocabularies, the encoding keyword,
//! the type-erased channel buffer ([`ComponentsArray`]), and the codec
//! functions that move buffers to and from the three payload forms.
//!
//! Key behaviors
//! -------------
//! - Parse and print the controlled keywords (`uint8`…`complex128`,
//!   `scalar`/`vector_n`/`matrix_n_m`/`symmetric_matrix_n`/`RGB`/`RGBA`,
//!   `none`/`base64`/`raw`) with exact round trips.
//! - Hold components channel-major as `Array2<T>` per numeric type and
//!   widen any buffer to `Complex128` for analysis.
//! - Decode and encode payloads bit-exactly: little-endian bytes for
//!   `base64` and `raw`, nested JSON numbers for `none`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A buffer's channels share one length; decoding enforces this and
//!   names the offending channel on violation.
//! - Codec round trips are the identity for every numeric type.
//!
//! Conventions
//! -----------
//! - Keyword parsing is strict and case-sensitive except where the format
//!   defines mixed-case keywords (`RGB`, `RGBA`).
//! - This module avoids I/O; raw payload bytes arrive and leave as
//!   in-memory slices, and callers own the files behind sidecar names.

pub mod buffer;
pub mod codec;
pub mod dataset_type;
pub mod encoding;
pub mod numeric_type;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::buffer::ComponentsArray;
pub use self::codec::{
    decode_base64, decode_inline, decode_raw, encode_base64, encode_inline, encode_raw,
    reshape_complex, sidecar_name,
};
pub use self::dataset_type::DatasetType;
pub use self::encoding::Encoding;
pub use self::numeric_type::NumericType;
