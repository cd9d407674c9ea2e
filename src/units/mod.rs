//! units — unit-aware physical quantities.
//!
//! Purpose
//! -------
//! Parse, format, and validate physical quantities for the rest of the
//! crate: strings like `"4 Å kg m µs^-2 K^-1 ppm"` become a finite
//! magnitude plus a composite unit carrying an SI scale, a
//! dimension-exponent vector, and a derived physical type.
//!
//! Key behaviors
//! -------------
//! - Fixed Unicode→ASCII substitutions, SI-prefix-aware symbol resolution,
//!   and a dedicated recursive-descent grammar for the numeric prefix
//!   ([`parser`], [`symbols`]).
//! - Immutable value types with validated constructors and exact
//!   parse/format round trips ([`Quantity`], [`CompositeUnit`]).
//! - Consistency helpers for absorbing caller-supplied values
//!   ([`check_consistency`], [`default_or_check`],
//!   [`resolve_quantity_name`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Magnitudes are finite; units derive their scale and dimensions from
//!   their factor list; parse errors carry byte positions.
//! - Physical-type comparison, not symbol comparison, defines unit
//!   compatibility throughout the crate.
//!
//! Downstream usage
//! ----------------
//! - The dimension layer stores every interval/offset/period as a
//!   [`Quantity`] and leans on [`default_or_check`] when absorbing wire
//!   specifications; the dataset layer parses its `unit` field with
//!   [`CompositeUnit::parse`].
//!
//! Testing notes
//! -------------
//! - Submodule tests cover the grammar, the tables, round trips, and the
//!   consistency branches; spec-level round-trip properties live with the
//!   quantity tests.

pub mod consistency;
pub mod errors;
pub mod parser;
pub mod quantity;
pub mod symbols;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::consistency::{check_consistency, default_or_check, resolve_quantity_name};
pub use self::errors::{QuantityNameWarning, UnitsError, UnitsResult};
pub use self::quantity::{CompositeUnit, Quantity, Ratio, UnitFactor};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::consistency::{check_consistency, default_or_check, resolve_quantity_name};
    pub use super::errors::{QuantityNameWarning, UnitsError, UnitsResult};
    pub use super::quantity::{CompositeUnit, Quantity};
}
