//! units::quantity — composite units and physical quantities.
//!
//! Purpose
//! -------
//! Define the immutable value types at the bottom of the crate: [`Ratio`]
//! (exact rational unit powers), [`UnitFactor`] and [`CompositeUnit`]
//! (an ordered multiplicative unit expression with a derived SI scale and
//! dimension-exponent vector), and [`Quantity`] (magnitude × unit) with the
//! arithmetic the dimension layer needs.
//!
//! Key behaviors
//! -------------
//! - Construct units only through validated paths ([`CompositeUnit::from_factors`],
//!   [`CompositeUnit::parse`]); scale and dimension exponents are always
//!   derived from the factor list, never stored independently.
//! - Format canonically (`"4 Angstrom kg us^-2"`) and to LaTeX; parsing the
//!   canonical form reproduces the original value exactly.
//! - Convert between compatible units via SI scale ratios; incompatible
//!   physical types fail with [`UnitsError::UnitMismatch`].
//! - Serialize as the canonical string form so quantities embed directly in
//!   the JSON wire objects.
//!
//! Invariants & assumptions
//! ------------------------
//! - Factor lists are merged: one entry per symbol, zero powers removed,
//!   first-occurrence order preserved.
//! - Magnitudes are finite; constructors reject NaN/±inf eagerly.
//! - `ppm` stays symbolic: its 1e-6 scale lives in the unit, never folded
//!   into the magnitude, so formatting round-trips.
//!
//! Conventions
//! -----------
//! - Negative exponents format as `^-n`; unity powers format bare.
//! - The parser only produces integer powers; rational powers exist so the
//!   algebra stays closed but never reach the wire.

use serde::{Deserialize, Serialize};

use crate::units::errors::{UnitsError, UnitsResult};
use crate::units::parser::parse_quantity_string;
use crate::units::symbols::{physical_type_of, resolve_symbol};

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}

/// Exact rational number used for unit powers and dimension exponents.
///
/// Kept normalized: denominator strictly positive, fraction fully reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    num: i32,
    den: i32,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { num: 0, den: 1 };

    /// Build a normalized ratio. `den` must be non-zero.
    pub fn new(num: i32, den: i32) -> Ratio {
        debug_assert!(den != 0, "Ratio denominator must be non-zero");
        let sign = if den < 0 { -1 } else { 1 };
        let divisor = gcd(num.unsigned_abs(), den.unsigned_abs()) as i32;
        Ratio { num: sign * num / divisor, den: sign * den / divisor }
    }

    pub fn integer(value: i32) -> Ratio {
        Ratio { num: value, den: 1 }
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    /// The integer value when `den == 1`.
    pub fn as_integer(&self) -> Option<i32> {
        if self.den == 1 { Some(self.num) } else { None }
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn add(&self, other: Ratio) -> Ratio {
        Ratio::new(self.num * other.den + other.num * self.den, self.den * other.den)
    }

    pub fn neg(&self) -> Ratio {
        Ratio { num: -self.num, den: self.den }
    }

    pub fn scale_by(&self, factor: i32) -> Ratio {
        Ratio::new(self.num * factor, self.den)
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 { write!(f, "{}", self.num) } else { write!(f, "{}/{}", self.num, self.den) }
    }
}

/// One `(symbol, power)` entry of a composite unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFactor {
    pub symbol: String,
    pub power: Ratio,
}

/// An ordered multiplicative unit expression.
///
/// Purpose
/// -------
/// Represent units such as `Angstrom kg us^-2` as a merged, ordered factor
/// list together with two derived summaries: the multiplier to the coherent
/// SI unit (`si_scale`) and the SI dimension-exponent vector used for
/// physical-type checks.
///
/// Notes
/// -----
/// - Equality compares the factor list (plus the derived fields, which are
///   a deterministic function of it), so parse/format round trips compare
///   equal exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeUnit {
    factors: Vec<UnitFactor>,
    scale: f64,
    dims: [Ratio; 7],
}

impl CompositeUnit {
    /// The unit of pure numbers: empty factor list, scale 1.
    pub fn dimensionless() -> CompositeUnit {
        CompositeUnit { factors: Vec::new(), scale: 1.0, dims: [Ratio::ZERO; 7] }
    }

    /// Build a unit from raw factors, resolving every symbol.
    ///
    /// Purpose
    /// -------
    /// The single validated constructor: merges duplicate symbols (summing
    /// powers, dropping zeros, keeping first-occurrence order) and derives
    /// the SI scale and dimension exponents from the table.
    ///
    /// Errors
    /// ------
    /// - [`UnitsError::UnknownUnit`] when a symbol resolves to no table
    ///   entry, with or without an SI prefix.
    pub fn from_factors(raw: Vec<UnitFactor>) -> UnitsResult<CompositeUnit> {
        let mut merged: Vec<UnitFactor> = Vec::with_capacity(raw.len());
        for factor in raw {
            if resolve_symbol(&factor.symbol).is_none() {
                return Err(UnitsError::UnknownUnit { symbol: factor.symbol });
            }
            match merged.iter_mut().find(|m| m.symbol == factor.symbol) {
                Some(existing) => existing.power = existing.power.add(factor.power),
                None => merged.push(factor),
            }
        }
        merged.retain(|factor| !factor.power.is_zero());

        let mut scale = 1.0_f64;
        let mut dims = [Ratio::ZERO; 7];
        for factor in &merged {
            let resolved = resolve_symbol(&factor.symbol)
                .unwrap_or_else(|| unreachable!("symbol validated above"));
            scale *= match factor.power.as_integer() {
                Some(power) => resolved.scale.powi(power),
                None => resolved.scale.powf(factor.power.as_f64()),
            };
            for (axis, exponent) in resolved.dims.iter().enumerate() {
                dims[axis] = dims[axis].add(factor.power.scale_by(i32::from(*exponent)));
            }
        }
        Ok(CompositeUnit { factors: merged, scale, dims })
    }

    /// Parse a pure unit expression such as `"s^-1"` or `"Angstrom kg"`.
    ///
    /// A numeric prefix other than an implicit 1 is rejected: scale factors
    /// belong to [`Quantity`] magnitudes, not to the unit itself.
    pub fn parse(input: &str) -> UnitsResult<CompositeUnit> {
        let parsed = parse_quantity_string(input)?;
        if parsed.magnitude != 1.0 {
            return Err(UnitsError::UnexpectedToken {
                position: 0,
                found: parsed.magnitude.to_string(),
            });
        }
        CompositeUnit::from_parsed(parsed.factors)
    }

    pub(crate) fn from_parsed(factors: Vec<(String, i32)>) -> UnitsResult<CompositeUnit> {
        CompositeUnit::from_factors(
            factors
                .into_iter()
                .map(|(symbol, power)| UnitFactor { symbol, power: Ratio::integer(power) })
                .collect(),
        )
    }

    pub fn factors(&self) -> &[UnitFactor] {
        &self.factors
    }

    /// Multiplier from one of this unit to the coherent SI unit of its
    /// dimension vector.
    pub fn si_scale(&self) -> f64 {
        self.scale
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dims.iter().all(Ratio::is_zero)
    }

    /// Name the unit's physical type ("length", "frequency", …).
    ///
    /// Non-integer dimension exponents have no named signature and report
    /// as "unknown".
    pub fn physical_type(&self) -> &'static str {
        let mut integral = [0_i8; 7];
        for (axis, exponent) in self.dims.iter().enumerate() {
            match exponent.as_integer() {
                Some(value) if (-128..=127).contains(&value) => integral[axis] = value as i8,
                _ => return "unknown",
            }
        }
        physical_type_of(integral)
    }

    /// Whether two units share a dimension vector (convertible).
    pub fn compatible(&self, other: &CompositeUnit) -> bool {
        self.dims == other.dims
    }

    /// Multiplier converting magnitudes in `self` to magnitudes in `target`.
    ///
    /// Errors
    /// ------
    /// - [`UnitsError::UnitMismatch`] when the dimension vectors differ.
    pub fn conversion_factor(&self, target: &CompositeUnit) -> UnitsResult<f64> {
        if !self.compatible(target) {
            return Err(UnitsError::UnitMismatch {
                expected: target.physical_type().to_string(),
                found: self.physical_type().to_string(),
            });
        }
        Ok(self.scale / target.scale)
    }

    /// Product of two units (factor lists concatenated and merged).
    pub fn multiply(&self, other: &CompositeUnit) -> CompositeUnit {
        let mut factors = self.factors.clone();
        factors.extend(other.factors.iter().cloned());
        CompositeUnit::from_factors(factors)
            .unwrap_or_else(|_| unreachable!("factors of valid units stay valid"))
    }

    /// Quotient of two units.
    pub fn divide(&self, other: &CompositeUnit) -> CompositeUnit {
        self.multiply(&other.recip())
    }

    /// The reciprocal unit (every power negated).
    pub fn recip(&self) -> CompositeUnit {
        let factors = self
            .factors
            .iter()
            .map(|factor| UnitFactor { symbol: factor.symbol.clone(), power: factor.power.neg() })
            .collect();
        CompositeUnit::from_factors(factors)
            .unwrap_or_else(|_| unreachable!("factors of valid units stay valid"))
    }

    /// LaTeX form of the unit expression, e.g. `\mathrm{\AA\;kg\;us^{-2}}`.
    pub fn to_latex(&self) -> String {
        let rendered: Vec<String> = self
            .factors
            .iter()
            .map(|factor| {
                let base = latex_symbol(&factor.symbol);
                if factor.power == Ratio::integer(1) {
                    base
                } else {
                    format!("{base}^{{{}}}", factor.power)
                }
            })
            .collect();
        if rendered.is_empty() { String::new() } else { format!("\\mathrm{{{}}}", rendered.join("\\;")) }
    }
}

fn latex_symbol(symbol: &str) -> String {
    match symbol {
        "Angstrom" => "\\AA".to_string(),
        "Ohm" => "\\Omega".to_string(),
        "hbar" => "\\hbar".to_string(),
        "deg" => "{}^{\\circ}".to_string(),
        "deg_C" => "{}^{\\circ}C".to_string(),
        "deg_F" => "{}^{\\circ}F".to_string(),
        other => {
            // Spell micro-prefixed symbols with a proper mu.
            match other.strip_prefix('u') {
                Some(rest)
                    if !rest.is_empty()
                        && resolve_symbol(rest).is_some()
                        && resolve_symbol(other).is_some()
                        && resolve_symbol(other) != resolve_symbol(rest) =>
                {
                    format!("\\mu {rest}")
                }
                _ => other.to_string(),
            }
        }
    }
}

impl std::fmt::Display for CompositeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for factor in &self.factors {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if factor.power == Ratio::integer(1) {
                write!(f, "{}", factor.symbol)?;
            } else {
                write!(f, "{}^{}", factor.symbol, factor.power)?;
            }
        }
        Ok(())
    }
}

/// A physical quantity: finite magnitude × composite unit.
///
/// Purpose
/// -------
/// The immutable value type carried by every dimension field (interval,
/// offsets, period) and by arbitrary-grid coordinates. Serializes as its
/// canonical string form.
///
/// Key behaviors
/// -------------
/// - `parse` / `Display` are exact inverses for API-reachable values.
/// - `try_add` / `try_sub` convert the right operand into the left unit and
///   fail on physical-type mismatches; `times` / `over` combine units.
///
/// Notes
/// -----
/// - Construction validates finiteness eagerly; no NaN/±inf magnitude can
///   enter the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    magnitude: f64,
    unit: CompositeUnit,
}

impl Quantity {
    /// Build a quantity, rejecting non-finite magnitudes.
    pub fn new(magnitude: f64, unit: CompositeUnit) -> UnitsResult<Quantity> {
        if !magnitude.is_finite() {
            return Err(UnitsError::NonFiniteMagnitude { value: magnitude });
        }
        Ok(Quantity { magnitude, unit })
    }

    /// Zero magnitude in the given unit.
    pub fn zero(unit: CompositeUnit) -> Quantity {
        Quantity { magnitude: 0.0, unit }
    }

    /// Parse a quantity string such as `"4.3e-2 K"` or `"10^-3 m"`.
    ///
    /// Purpose
    /// -------
    /// The public entry point of the quantity grammar: Unicode substitution,
    /// numeric-prefix evaluation, unit-token resolution.
    ///
    /// Errors
    /// ------
    /// - Any [`UnitsError`] parse variant, with byte positions into the
    ///   substituted string.
    pub fn parse(input: &str) -> UnitsResult<Quantity> {
        let parsed = parse_quantity_string(input)?;
        let unit = CompositeUnit::from_parsed(parsed.factors)?;
        Quantity::new(parsed.magnitude, unit)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &CompositeUnit {
        &self.unit
    }

    /// Magnitude expressed in the coherent SI unit of the dimension vector.
    pub fn si_value(&self) -> f64 {
        self.magnitude * self.unit.si_scale()
    }

    pub fn physical_type(&self) -> &'static str {
        self.unit.physical_type()
    }

    /// Convert into a compatible target unit.
    pub fn to(&self, target: &CompositeUnit) -> UnitsResult<Quantity> {
        let factor = self.unit.conversion_factor(target)?;
        Quantity::new(self.magnitude * factor, target.clone())
    }

    /// Sum in the left operand's unit.
    ///
    /// Errors
    /// ------
    /// - [`UnitsError::UnitMismatch`] when the operands' physical types
    ///   differ.
    pub fn try_add(&self, other: &Quantity) -> UnitsResult<Quantity> {
        let converted = other.to(&self.unit)?;
        Quantity::new(self.magnitude + converted.magnitude, self.unit.clone())
    }

    /// Difference in the left operand's unit.
    pub fn try_sub(&self, other: &Quantity) -> UnitsResult<Quantity> {
        let converted = other.to(&self.unit)?;
        Quantity::new(self.magnitude - converted.magnitude, self.unit.clone())
    }

    /// Scale the magnitude by a dimensionless factor.
    pub fn scaled(&self, factor: f64) -> UnitsResult<Quantity> {
        Quantity::new(self.magnitude * factor, self.unit.clone())
    }

    /// Product with another quantity (units multiplied).
    pub fn times(&self, other: &Quantity) -> UnitsResult<Quantity> {
        Quantity::new(self.magnitude * other.magnitude, self.unit.multiply(&other.unit))
    }

    /// Quotient by another quantity (units divided).
    pub fn over(&self, other: &Quantity) -> UnitsResult<Quantity> {
        Quantity::new(self.magnitude / other.magnitude, self.unit.divide(&other.unit))
    }

    /// Multiplicative inverse; fails on zero magnitude.
    pub fn recip(&self) -> UnitsResult<Quantity> {
        Quantity::new(self.magnitude.recip(), self.unit.recip())
    }

    /// LaTeX form, magnitude and unit: `4\ \mathrm{\AA\;kg}`.
    pub fn format_latex(&self) -> String {
        let unit = self.unit.to_latex();
        if unit.is_empty() {
            format!("{}", self.magnitude)
        } else {
            format!("{}\\ {unit}", self.magnitude)
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.factors().is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

impl TryFrom<String> for Quantity {
    type Error = UnitsError;

    fn try_from(value: String) -> UnitsResult<Quantity> {
        Quantity::parse(&value)
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Canonical parse/format round trips, including the compound example
    //   with all Unicode substitutions.
    // - Derived SI scale, dimension vector, and physical-type naming.
    // - Unit conversion and mismatch errors; quantity arithmetic.
    // - The symbolic treatment of ppm and negative exponents in formatting.
    //
    // They intentionally DO NOT cover:
    // - Tokenizer-level error positions (parser tests own those).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the round-trip property on a set of canonical quantity
    // strings: format(parse(s)) parses back to an equal Quantity.
    //
    // Given
    // -----
    // - Canonical strings spanning compound units, negative powers,
    //   dimensionless ppm, and bare numbers.
    //
    // Expect
    // ------
    // - parse(format(parse(s))) == parse(s) for every s.
    fn quantity_round_trips_through_canonical_format() {
        // Arrange
        let inputs =
            ["4 Å kg m µs^-2 K^-1 ppm", "0.05 s^-1", "-3.2 mT", "9.6e2 Hz", "42", "2.5 ppm"];

        for input in inputs {
            // Act
            let first = Quantity::parse(input).unwrap();
            let reparsed = Quantity::parse(&first.to_string()).unwrap();

            // Assert
            assert_eq!(reparsed, first, "round trip failed for {input:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify scale and physical-type derivation on the compound example.
    //
    // Given
    // -----
    // - "4 Å kg µs^-2" (an energy-per-length-ish vector, unnamed).
    // - "100 Hz" and "2.5 ppm".
    //
    // Expect
    // ------
    // - The compound unit's SI scale is 1e-10 · 1 · (1e-6)^-2 = 1e2.
    // - "Hz" names "frequency"; "ppm" is dimensionless with scale 1e-6.
    fn quantity_derives_scale_and_physical_type() {
        // Act
        let compound = Quantity::parse("4 Å kg µs^-2").unwrap();
        let rate = Quantity::parse("100 Hz").unwrap();
        let shift = Quantity::parse("2.5 ppm").unwrap();

        // Assert
        let expected_scale = 1e-10 * (1e-6_f64).powi(-2);
        assert!((compound.unit().si_scale() - expected_scale).abs() < expected_scale * 1e-12);
        assert_eq!(rate.physical_type(), "frequency");
        assert_eq!(shift.physical_type(), "dimensionless");
        assert!((shift.si_value() - 2.5e-6).abs() < 1e-18);
        assert_eq!(shift.to_string(), "2.5 ppm");
    }

    #[test]
    // Purpose
    // -------
    // Verify unit conversion between compatible units and the mismatch
    // error between incompatible ones.
    //
    // Given
    // -----
    // - 1500 ms converted to s; 1 km added to 250 m; "5 s" vs "2 m".
    //
    // Expect
    // ------
    // - 1.5 s; 1.25 km; UnitMismatch naming both physical types.
    fn quantity_converts_compatible_units_and_rejects_mismatches() {
        // Arrange
        let millis = Quantity::parse("1500 ms").unwrap();
        let second = CompositeUnit::parse("s").unwrap();
        let km = Quantity::parse("1 km").unwrap();
        let m = Quantity::parse("250 m").unwrap();

        // Act
        let converted = millis.to(&second).unwrap();
        let sum = km.try_add(&m).unwrap();
        let mismatch = Quantity::parse("5 s").unwrap().try_add(&Quantity::parse("2 m").unwrap());

        // Assert
        assert!((converted.magnitude() - 1.5).abs() < 1e-12);
        assert_eq!(converted.unit(), &second);
        assert!((sum.magnitude() - 1.25).abs() < 1e-12);
        assert_eq!(
            mismatch.unwrap_err(),
            UnitsError::UnitMismatch { expected: "time".to_string(), found: "length".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify reciprocal algebra: (count · interval)⁻¹ produces the dual
    // unit with a negative exponent and the right magnitude.
    //
    // Given
    // -----
    // - interval = 2 s, count = 10.
    //
    // Expect
    // ------
    // - (10 · 2 s)⁻¹ = 0.05 s^-1, formatted "0.05 s^-1", type "frequency".
    fn quantity_reciprocal_produces_dual_unit() {
        // Arrange
        let interval = Quantity::parse("2 s").unwrap();

        // Act
        let reciprocal = interval.scaled(10.0).unwrap().recip().unwrap();

        // Assert
        assert!((reciprocal.magnitude() - 0.05).abs() < 1e-15);
        assert_eq!(reciprocal.to_string(), "0.05 s^-1");
        assert_eq!(reciprocal.physical_type(), "frequency");
    }

    #[test]
    // Purpose
    // -------
    // Verify that repeated symbols merge and zero powers drop out.
    //
    // Given
    // -----
    // - "m m" and "m s s^-1".
    //
    // Expect
    // ------
    // - "m^2" (area) and "m" (length; the seconds cancel).
    fn composite_unit_merges_factors_and_drops_zero_powers() {
        // Act
        let area = Quantity::parse("m m").unwrap();
        let cancelled = Quantity::parse("m s s^-1").unwrap();

        // Assert
        assert_eq!(area.unit().to_string(), "m^2");
        assert_eq!(area.physical_type(), "area");
        assert_eq!(cancelled.unit().to_string(), "m");
        assert_eq!(cancelled.physical_type(), "length");
    }

    #[test]
    // Purpose
    // -------
    // Verify LaTeX formatting of special symbols and powers.
    //
    // Given
    // -----
    // - "4 Å kg µs^-2".
    //
    // Expect
    // ------
    // - \AA, a \mu-spelled microsecond, and a braced exponent.
    fn quantity_formats_latex_with_symbol_mapping() {
        // Act
        let latex = Quantity::parse("4 Å kg µs^-2").unwrap().format_latex();

        // Assert
        assert!(latex.contains("\\AA"), "expected \\AA in {latex:?}");
        assert!(latex.contains("\\mu s^{-2}"), "expected \\mu s^{{-2}} in {latex:?}");
        assert!(latex.starts_with("4\\ \\mathrm{"), "expected magnitude prefix in {latex:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify eager finiteness validation and the pure-unit parse guard.
    //
    // Given
    // -----
    // - A NaN magnitude and a unit string with a numeric prefix.
    //
    // Expect
    // ------
    // - NonFiniteMagnitude and UnexpectedToken respectively.
    fn quantity_and_unit_constructors_validate_eagerly() {
        // Act / Assert
        assert!(matches!(
            Quantity::new(f64::NAN, CompositeUnit::dimensionless()),
            Err(UnitsError::NonFiniteMagnitude { .. })
        ));
        assert!(matches!(
            CompositeUnit::parse("2 s"),
            Err(UnitsError::UnexpectedToken { .. })
        ));
    }
}
