//! units::consistency — physical-type checks and defaulting helpers.
//!
//! Purpose
//! -------
//! Free-standing validators used by the dimension and dataset layers when
//! absorbing caller-supplied quantities: consistency against an expected
//! unit, zero-defaulting of optional fields, and quantity-name resolution.
//!
//! Conventions
//! -----------
//! - Consistency is judged on physical types (dimension-exponent
//!   signatures), never on specific symbols, so `Hz` and `s^-1` agree.
//! - The only non-fatal path is name resolution against a unit whose
//!   physical type is unknown; it returns a [`QuantityNameWarning`] value
//!   alongside the accepted name.

use crate::units::errors::{QuantityNameWarning, UnitsError, UnitsResult};
use crate::units::quantity::{CompositeUnit, Quantity};

/// Check that a quantity's physical type matches an expected unit's.
///
/// Purpose
/// -------
/// Gate caller-supplied quantities (offsets, periods, explicit reciprocal
/// intervals) against the unit family a field requires.
///
/// Parameters
/// ----------
/// - `quantity`: the value under validation.
/// - `expected`: a unit carrying the required physical type.
///
/// Returns
/// -------
/// - `Ok(Quantity)`: the input, unchanged, when the types agree.
///
/// Errors
/// ------
/// - [`UnitsError::UnitMismatch`] naming the expected and found physical
///   types.
///
/// Examples
/// --------
/// ```
/// use csdm::units::{CompositeUnit, Quantity, check_consistency};
///
/// let rate = Quantity::parse("100 Hz").unwrap();
/// let per_second = CompositeUnit::parse("s^-1").unwrap();
/// assert!(check_consistency(&rate, &per_second).is_ok());
///
/// let length = Quantity::parse("3 m").unwrap();
/// assert!(check_consistency(&length, &per_second).is_err());
/// ```
pub fn check_consistency(quantity: &Quantity, expected: &CompositeUnit) -> UnitsResult<Quantity> {
    let found = quantity.physical_type();
    let wanted = expected.physical_type();
    if found != wanted {
        return Err(UnitsError::UnitMismatch {
            expected: wanted.to_string(),
            found: found.to_string(),
        });
    }
    Ok(quantity.clone())
}

/// Default an optional quantity to zero in a given unit, or check it.
///
/// Purpose
/// -------
/// Implement the "absent means zero" convention for offset fields: `None`
/// produces a zero magnitude in `unit`; `Some` must pass
/// [`check_consistency`].
///
/// Examples
/// --------
/// ```
/// use csdm::units::{CompositeUnit, Quantity, default_or_check};
///
/// let seconds = CompositeUnit::parse("s").unwrap();
/// let defaulted = default_or_check(None, &seconds).unwrap();
/// assert_eq!(defaulted.magnitude(), 0.0);
///
/// let supplied = Quantity::parse("3 ms").unwrap();
/// let kept = default_or_check(Some(&supplied), &seconds).unwrap();
/// assert_eq!(kept, supplied);
/// ```
pub fn default_or_check(
    quantity: Option<&Quantity>,
    unit: &CompositeUnit,
) -> UnitsResult<Quantity> {
    match quantity {
        None => Ok(Quantity::zero(unit.clone())),
        Some(value) => check_consistency(value, unit),
    }
}

/// Resolve a quantity name against a unit's physical type.
///
/// Purpose
/// -------
/// Produce the canonical quantity-name string for a dimension or dataset:
/// absent names fall back to the unit's physical type; supplied names must
/// agree with it case-insensitively.
///
/// Parameters
/// ----------
/// - `name`: the caller-supplied name, if any.
/// - `unit`: the unit whose physical type is authoritative.
///
/// Returns
/// -------
/// - `Ok((name, warning))`: the resolved name. The warning is `Some` only
///   on the non-fatal path: the unit's physical type is `"unknown"`, so the
///   supplied name is accepted without verification.
///
/// Errors
/// ------
/// - [`UnitsError::QuantityNameMismatch`] when the supplied name disagrees
///   with a known physical type.
///
/// Notes
/// -----
/// - On a case-insensitive match the canonical (lower-case) physical-type
///   string is returned, not the caller's spelling.
pub fn resolve_quantity_name(
    name: Option<&str>,
    unit: &CompositeUnit,
) -> UnitsResult<(String, Option<QuantityNameWarning>)> {
    let physical_type = unit.physical_type();
    match name {
        None => Ok((physical_type.to_string(), None)),
        Some(supplied) if physical_type == "unknown" => {
            let warning = QuantityNameWarning { supplied: supplied.to_string() };
            Ok((supplied.to_string(), Some(warning)))
        }
        Some(supplied) if supplied.eq_ignore_ascii_case(physical_type) => {
            Ok((physical_type.to_string(), None))
        }
        Some(supplied) => Err(UnitsError::QuantityNameMismatch {
            supplied: supplied.to_string(),
            physical_type: physical_type.to_string(),
        }),
    }
}
