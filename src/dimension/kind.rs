//! dimension::kind — the closed [`Dimension`] union and spec dispatch.
//!
//! Purpose
//! -------
//! Tie the three concrete variants into one exhaustive enum, dispatch the
//! shared operations across them, and translate between dimensions and
//! their wire specifications ([`DimensionSpec`]).
//!
//! Key behaviors
//! -------------
//! - Variant selection by key presence: `number_of_points` +
//!   `sampling_interval` build a linear grid, `values` an arbitrary grid,
//!   `values` + `non_quantitative` a labeled dimension. Mixing key groups
//!   fails with `AmbiguousSpec`; selecting none fails with `MissingField`.
//! - Quantity names resolve against the unit's physical type at this
//!   boundary; the core constructors receive pre-resolved names, and any
//!   accepted-but-unverifiable names surface as warning values.
//! - Operations a variant cannot support (reciprocal math on an arbitrary
//!   grid, any quantitative accessor on labels) fail with
//!   `UnsupportedOperation` naming both the operation and the kind.
//! - `to_spec` emits the minimal wire form: keys holding derivable
//!   defaults (zero offsets, the count-derived reciprocal interval, the
//!   unit's own physical type as quantity name) are dropped.
//!
//! Invariants & assumptions
//! ------------------------
//! - `from_spec(to_spec(d))` rebuilds `d` exactly, warnings aside.
//! - Dispatch rejects keys foreign to the selected variant instead of
//!   ignoring them, matching the eager-validation rule everywhere else.

use ndarray::{Array1, ArrayView1};

use crate::dimension::core::labeled::{LabeledDimension, LabeledOptions};
use crate::dimension::core::linear::{LinearDimension, LinearOptions, ReciprocalOptions};
use crate::dimension::core::monotonic::{MonotonicDimension, MonotonicOptions, SamplingType};
use crate::dimension::errors::{DimensionError, DimensionResult, TruncationWarning};
use crate::dimension::spec::{DimensionSpec, ReciprocalSpec, quantity_text};
use crate::units::consistency::resolve_quantity_name;
use crate::units::errors::QuantityNameWarning;
use crate::units::quantity::{CompositeUnit, Quantity};

/// A controlled-variable axis: one of the three sampling laws.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Linear(LinearDimension),
    Monotonic(MonotonicDimension),
    Labeled(LabeledDimension),
}

/// Emit a quantity only when its magnitude is nonzero.
fn nonzero(quantity: &Quantity) -> Option<Quantity> {
    (quantity.magnitude() != 0.0).then(|| quantity.clone())
}

/// Emit a quantity name only when it differs from the unit's own physical
/// type, which `from_spec` rederives for free.
fn emitted_name(name: &str, unit: &CompositeUnit) -> Option<String> {
    (name != unit.physical_type()).then(|| name.to_string())
}

/// The reciprocal interval `new` would derive for this grid, if the
/// arithmetic is representable.
fn derived_reciprocal_interval(interval: &Quantity, count: usize) -> Option<Quantity> {
    interval.scaled(count as f64).ok().and_then(|scaled| scaled.recip().ok())
}

fn parse_sampling_type(keyword: Option<&str>) -> DimensionResult<SamplingType> {
    match keyword {
        None => Ok(SamplingType::Grid),
        Some(keyword) => SamplingType::from_keyword(keyword)
            .ok_or_else(|| DimensionError::InvalidSamplingType { keyword: keyword.to_string() }),
    }
}

fn from_linear_spec(
    spec: &DimensionSpec,
) -> DimensionResult<(Dimension, Vec<QuantityNameWarning>)> {
    let count = spec
        .number_of_points
        .ok_or(DimensionError::MissingField { field: "number_of_points" })?
        as usize;
    let interval = spec
        .sampling_interval
        .clone()
        .ok_or(DimensionError::MissingField { field: "sampling_interval" })?;
    if parse_sampling_type(spec.sampling_type.as_deref())? == SamplingType::Scatter {
        return Err(DimensionError::UnsupportedOperation {
            operation: "scatter sampling",
            kind: "linear",
        });
    }

    let mut warnings = Vec::new();
    let (quantity_name, warning) =
        resolve_quantity_name(spec.quantity.as_deref(), interval.unit())?;
    warnings.extend(warning);

    let reciprocal_spec = spec.reciprocal.clone().unwrap_or_default();
    let dual_unit = match &reciprocal_spec.sampling_interval {
        Some(dual_interval) => dual_interval.unit().clone(),
        None => interval.unit().recip(),
    };
    let (reciprocal_quantity_name, warning) =
        resolve_quantity_name(reciprocal_spec.quantity.as_deref(), &dual_unit)?;
    warnings.extend(warning);

    let options = LinearOptions {
        label: spec.label.clone(),
        reference_offset: spec.reference_offset.clone(),
        origin_offset: spec.origin_offset.clone(),
        made_dimensionless: spec.made_dimensionless,
        reverse: spec.reverse,
        fft_output_order: spec.fft_output_order,
        period: spec.period.clone(),
        quantity_name: Some(quantity_name),
        reciprocal: ReciprocalOptions {
            interval: reciprocal_spec.sampling_interval,
            reference_offset: reciprocal_spec.reference_offset,
            origin_offset: reciprocal_spec.origin_offset,
            made_dimensionless: reciprocal_spec.made_dimensionless,
            reverse: reciprocal_spec.reverse,
            period: reciprocal_spec.period,
            quantity_name: Some(reciprocal_quantity_name),
            label: reciprocal_spec.label,
        },
    };
    Ok((Dimension::Linear(LinearDimension::new(count, interval, options)?), warnings))
}

fn from_monotonic_spec(
    spec: &DimensionSpec,
    texts: &[String],
) -> DimensionResult<(Dimension, Vec<QuantityNameWarning>)> {
    if spec.reference_offset.is_some() {
        return Err(DimensionError::AmbiguousSpec {
            detail: "reference_offset applies only to a linear grid",
        });
    }
    if spec.fft_output_order {
        return Err(DimensionError::AmbiguousSpec {
            detail: "fft_output_order applies only to a linear grid",
        });
    }
    if spec.reciprocal.as_ref().is_some_and(|block| !block.is_default()) {
        return Err(DimensionError::AmbiguousSpec {
            detail: "a reciprocal block applies only to a linear grid",
        });
    }

    let mut values = Vec::with_capacity(texts.len());
    for text in texts {
        values.push(Quantity::parse(text)?);
    }
    let mut warnings = Vec::new();
    let quantity_name = match values.first() {
        Some(first) => {
            let (name, warning) = resolve_quantity_name(spec.quantity.as_deref(), first.unit())?;
            warnings.extend(warning);
            Some(name)
        }
        None => None,
    };
    let options = MonotonicOptions {
        label: spec.label.clone(),
        origin_offset: spec.origin_offset.clone(),
        made_dimensionless: spec.made_dimensionless,
        reverse: spec.reverse,
        period: spec.period.clone(),
        quantity_name,
        sampling_type: parse_sampling_type(spec.sampling_type.as_deref())?,
        reciprocal_values: None,
    };
    Ok((Dimension::Monotonic(MonotonicDimension::new(&values, options)?), warnings))
}

fn from_labeled_spec(
    spec: &DimensionSpec,
    texts: &[String],
) -> DimensionResult<(Dimension, Vec<QuantityNameWarning>)> {
    let quantitative_keys = spec.reference_offset.is_some()
        || spec.origin_offset.is_some()
        || spec.made_dimensionless
        || spec.fft_output_order
        || spec.period.is_some()
        || spec.quantity.is_some()
        || spec.sampling_type.is_some()
        || spec.reciprocal.as_ref().is_some_and(|block| !block.is_default());
    if quantitative_keys {
        return Err(DimensionError::AmbiguousSpec {
            detail: "quantitative keys cannot be combined with non_quantitative",
        });
    }
    let options = LabeledOptions { label: spec.label.clone(), reverse: spec.reverse };
    Ok((Dimension::Labeled(LabeledDimension::new(texts.to_vec(), options)?), Vec::new()))
}

impl Dimension {
    /// Build a dimension from its wire specification.
    ///
    /// Purpose
    /// -------
    /// Select the variant by key presence, resolve quantity names against
    /// the units involved, and run the variant constructor. Name
    /// resolutions that were accepted without verification (unknown
    /// physical types) come back as warning values.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::AmbiguousSpec`] when keys from different
    ///   variants are mixed.
    /// - [`DimensionError::MissingField`] when no variant is selected or a
    ///   selected variant lacks a required key.
    /// - Everything the variant constructors raise.
    pub fn from_spec(
        spec: &DimensionSpec,
    ) -> DimensionResult<(Dimension, Vec<QuantityNameWarning>)> {
        let has_linear_keys =
            spec.number_of_points.is_some() || spec.sampling_interval.is_some();
        match (&spec.values, has_linear_keys) {
            (Some(_), true) => Err(DimensionError::AmbiguousSpec {
                detail: "values cannot be combined with number_of_points/sampling_interval",
            }),
            (None, true) if spec.non_quantitative => Err(DimensionError::AmbiguousSpec {
                detail: "non_quantitative cannot be combined with number_of_points/sampling_interval",
            }),
            (None, true) => from_linear_spec(spec),
            (Some(texts), false) if spec.non_quantitative => from_labeled_spec(spec, texts),
            (Some(texts), false) => from_monotonic_spec(spec, texts),
            (None, false) => Err(DimensionError::MissingField {
                field: if spec.non_quantitative {
                    "values"
                } else {
                    "number_of_points with sampling_interval, or values"
                },
            }),
        }
    }

    /// Minimal wire form of this dimension; derivable defaults are
    /// dropped.
    pub fn to_spec(&self) -> DimensionSpec {
        match self {
            Dimension::Linear(linear) => {
                let reciprocal = linear.reciprocal();
                let derived =
                    derived_reciprocal_interval(linear.interval(), linear.count());
                let block = ReciprocalSpec {
                    sampling_interval: if derived.as_ref() == Some(reciprocal.interval()) {
                        None
                    } else {
                        Some(reciprocal.interval().clone())
                    },
                    reference_offset: nonzero(reciprocal.reference_offset()),
                    origin_offset: nonzero(reciprocal.origin_offset()),
                    made_dimensionless: reciprocal.made_dimensionless(),
                    reverse: reciprocal.reverse(),
                    period: reciprocal.period().cloned(),
                    quantity: emitted_name(
                        reciprocal.quantity_name(),
                        reciprocal.interval().unit(),
                    ),
                    label: reciprocal.label().to_string(),
                };
                DimensionSpec {
                    number_of_points: Some(linear.count() as u64),
                    sampling_interval: Some(linear.interval().clone()),
                    reference_offset: nonzero(linear.reference_offset()),
                    origin_offset: nonzero(linear.origin_offset()),
                    made_dimensionless: linear.made_dimensionless(),
                    reverse: linear.reverse(),
                    fft_output_order: linear.fft_output_order(),
                    period: linear.period().cloned(),
                    quantity: emitted_name(linear.quantity_name(), linear.interval().unit()),
                    label: linear.label().to_string(),
                    reciprocal: (!block.is_default()).then_some(block),
                    ..DimensionSpec::default()
                }
            }
            Dimension::Monotonic(monotonic) => DimensionSpec {
                values: Some(
                    monotonic
                        .values()
                        .iter()
                        .map(|&magnitude| quantity_text(magnitude, monotonic.unit()))
                        .collect(),
                ),
                origin_offset: nonzero(monotonic.origin_offset()),
                made_dimensionless: monotonic.made_dimensionless(),
                reverse: monotonic.reverse(),
                period: monotonic.period().cloned(),
                quantity: emitted_name(monotonic.quantity_name(), monotonic.unit()),
                label: monotonic.label().to_string(),
                sampling_type: (monotonic.sampling_type() == SamplingType::Scatter)
                    .then(|| SamplingType::Scatter.keyword().to_string()),
                ..DimensionSpec::default()
            },
            Dimension::Labeled(labeled) => DimensionSpec {
                values: Some(labeled.values().to_vec()),
                non_quantitative: true,
                reverse: labeled.reverse(),
                label: labeled.label().to_string(),
                ..DimensionSpec::default()
            },
        }
    }

    // ---- Shared accessors -------------------------------------------------

    /// Variant keyword used in messages and the Python surface.
    pub fn kind(&self) -> &'static str {
        match self {
            Dimension::Linear(_) => "linear",
            Dimension::Monotonic(_) => "monotonic",
            Dimension::Labeled(_) => "labeled",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Dimension::Linear(linear) => linear.label(),
            Dimension::Monotonic(monotonic) => monotonic.label(),
            Dimension::Labeled(labeled) => labeled.label(),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Dimension::Linear(linear) => linear.count(),
            Dimension::Monotonic(monotonic) => monotonic.count(),
            Dimension::Labeled(labeled) => labeled.count(),
        }
    }

    pub fn is_quantitative(&self) -> bool {
        !matches!(self, Dimension::Labeled(_))
    }

    /// Sampling class this dimension contributes to the model layout.
    /// Linear grids and label sequences are always `grid`.
    pub fn sampling_type(&self) -> SamplingType {
        match self {
            Dimension::Monotonic(monotonic) => monotonic.sampling_type(),
            Dimension::Linear(_) | Dimension::Labeled(_) => SamplingType::Grid,
        }
    }

    pub fn quantity_name(&self) -> Option<&str> {
        match self {
            Dimension::Linear(linear) => Some(linear.quantity_name()),
            Dimension::Monotonic(monotonic) => Some(monotonic.quantity_name()),
            Dimension::Labeled(_) => None,
        }
    }

    pub fn axis_label(&self) -> String {
        match self {
            Dimension::Linear(linear) => linear.axis_label(),
            Dimension::Monotonic(monotonic) => monotonic.axis_label(),
            Dimension::Labeled(labeled) => labeled.axis_label(),
        }
    }

    // ---- Quantitative surface (labeled dimensions are unsupported) --------

    /// Displayed coordinate magnitudes.
    pub fn coordinates(&self) -> DimensionResult<ArrayView1<'_, f64>> {
        match self {
            Dimension::Linear(linear) => Ok(linear.coordinates()),
            Dimension::Monotonic(monotonic) => Ok(monotonic.coordinates()),
            Dimension::Labeled(_) => Err(DimensionError::UnsupportedOperation {
                operation: "coordinates",
                kind: "labeled",
            }),
        }
    }

    /// Category strings of a labeled dimension, in display order.
    pub fn labels(&self) -> DimensionResult<Vec<&str>> {
        match self {
            Dimension::Labeled(labeled) => Ok(labeled.coordinates()),
            other => Err(DimensionError::UnsupportedOperation {
                operation: "labels",
                kind: other.kind(),
            }),
        }
    }

    pub fn coordinates_unit(&self) -> DimensionResult<CompositeUnit> {
        match self {
            Dimension::Linear(linear) => Ok(linear.coordinates_unit()),
            Dimension::Monotonic(monotonic) => Ok(monotonic.coordinates_unit()),
            Dimension::Labeled(_) => Err(DimensionError::UnsupportedOperation {
                operation: "coordinates_unit",
                kind: "labeled",
            }),
        }
    }

    pub fn absolute_coordinates(&self) -> DimensionResult<Array1<f64>> {
        match self {
            Dimension::Linear(linear) => linear.absolute_coordinates(),
            Dimension::Monotonic(monotonic) => monotonic.absolute_coordinates(),
            Dimension::Labeled(_) => Err(DimensionError::UnsupportedOperation {
                operation: "absolute_coordinates",
                kind: "labeled",
            }),
        }
    }

    pub fn reciprocal_coordinates(&self) -> DimensionResult<ArrayView1<'_, f64>> {
        match self {
            Dimension::Linear(linear) => Ok(linear.reciprocal_coordinates()),
            Dimension::Monotonic(monotonic) => monotonic.reciprocal_coordinates(),
            Dimension::Labeled(_) => Err(DimensionError::UnsupportedOperation {
                operation: "reciprocal_coordinates",
                kind: "labeled",
            }),
        }
    }

    // ---- Mutators ---------------------------------------------------------

    /// Swap a linear dimension with its Fourier dual in place.
    pub fn to_reciprocal(&mut self) -> DimensionResult<()> {
        match self {
            Dimension::Linear(linear) => linear.to_reciprocal(),
            other => Err(DimensionError::UnsupportedOperation {
                operation: "to_reciprocal",
                kind: other.kind(),
            }),
        }
    }

    pub fn make_dimensionless(&mut self, dimensionless: bool) -> DimensionResult<()> {
        match self {
            Dimension::Linear(linear) => linear.make_dimensionless(dimensionless),
            Dimension::Monotonic(monotonic) => monotonic.make_dimensionless(dimensionless),
            Dimension::Labeled(_) => Err(DimensionError::UnsupportedOperation {
                operation: "make_dimensionless",
                kind: "labeled",
            }),
        }
    }

    /// Resize the dimension. Linear grids resize freely and never warn;
    /// monotonic and labeled dimensions truncate only.
    pub fn set_count(&mut self, count: usize) -> DimensionResult<Option<TruncationWarning>> {
        match self {
            Dimension::Linear(linear) => linear.set_count(count).map(|()| None),
            Dimension::Monotonic(monotonic) => monotonic.set_count(count),
            Dimension::Labeled(labeled) => labeled.set_count(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Variant dispatch by key presence, including the ambiguous and
    //   missing-key rejections and foreign-key rejection per variant.
    // - Quantity-name resolution at the spec boundary, both the silent
    //   match and the accepted-with-warning path.
    // - to_spec minimality and the from_spec(to_spec(d)) round trip for
    //   all three variants.
    // - UnsupportedOperation dispatch on the quantitative surface.
    //
    // They intentionally DO NOT cover:
    // - Coordinate math (core module tests) or envelope serialization
    //   (model::wire tests).
    // -------------------------------------------------------------------------

    fn spec_from_json(text: &str) -> DimensionSpec {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify key-presence dispatch builds the right variant for all three
    // key groups.
    //
    // Given
    // -----
    // - A linear, a monotonic, and a labeled specification.
    //
    // Expect
    // ------
    // - Matching variants with the declared counts and no warnings.
    fn dimension_from_spec_dispatches_on_key_presence() {
        // Arrange
        let linear = spec_from_json(r#"{"number_of_points": 4, "sampling_interval": "1 s"}"#);
        let monotonic = spec_from_json(r#"{"values": ["1 s", "5 s", "20 s"]}"#);
        let labeled =
            spec_from_json(r#"{"values": ["Cu", "Ag"], "non_quantitative": true}"#);

        // Act
        let (linear, linear_warnings) = Dimension::from_spec(&linear).unwrap();
        let (monotonic, _) = Dimension::from_spec(&monotonic).unwrap();
        let (labeled, _) = Dimension::from_spec(&labeled).unwrap();

        // Assert
        assert_eq!(linear.kind(), "linear");
        assert_eq!(linear.count(), 4);
        assert!(linear_warnings.is_empty());
        assert_eq!(monotonic.kind(), "monotonic");
        assert_eq!(monotonic.count(), 3);
        assert_eq!(labeled.kind(), "labeled");
        assert_eq!(labeled.labels().unwrap(), vec!["Cu", "Ag"]);
    }

    #[test]
    // Purpose
    // -------
    // Verify ambiguous and empty specifications are rejected.
    //
    // Given
    // -----
    // - values together with number_of_points; an empty object; a labeled
    //   spec carrying a period; a monotonic spec carrying a
    //   reference_offset.
    //
    // Expect
    // ------
    // - AmbiguousSpec, MissingField, and two more AmbiguousSpec errors.
    fn dimension_from_spec_rejects_mixed_and_empty_key_groups() {
        // Arrange
        let mixed = spec_from_json(
            r#"{"number_of_points": 4, "sampling_interval": "1 s", "values": ["1 s"]}"#,
        );
        let empty = spec_from_json("{}");
        let labeled_period = spec_from_json(
            r#"{"values": ["a"], "non_quantitative": true, "period": "3 s"}"#,
        );
        let monotonic_reference =
            spec_from_json(r#"{"values": ["1 s", "2 s"], "reference_offset": "1 s"}"#);

        // Act / Assert
        assert!(matches!(
            Dimension::from_spec(&mixed).unwrap_err(),
            DimensionError::AmbiguousSpec { .. }
        ));
        assert!(matches!(
            Dimension::from_spec(&empty).unwrap_err(),
            DimensionError::MissingField { .. }
        ));
        assert!(matches!(
            Dimension::from_spec(&labeled_period).unwrap_err(),
            DimensionError::AmbiguousSpec { .. }
        ));
        assert!(matches!(
            Dimension::from_spec(&monotonic_reference).unwrap_err(),
            DimensionError::AmbiguousSpec { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify quantity-name resolution at the spec boundary: a matching
    // name resolves silently, a name on an unknown physical type is
    // accepted with a warning, and scatter sampling parses.
    //
    // Given
    // -----
    // - A linear spec with quantity "Time" (mixed case) on a seconds axis.
    // - A scatter monotonic spec with quantity "dipolar coupling" on an
    //   m^-1 s^-1 axis (no tabulated physical type).
    //
    // Expect
    // ------
    // - "time" stored, no warning; "dipolar coupling" stored with one
    //   warning; sampling type scatter.
    fn dimension_from_spec_resolves_quantity_names() {
        // Arrange
        let linear = spec_from_json(
            r#"{"number_of_points": 3, "sampling_interval": "1 s", "quantity": "Time"}"#,
        );
        let exotic = spec_from_json(
            r#"{"values": ["1 m^-1 s^-1", "2 m^-1 s^-1"],
                "quantity": "dipolar coupling",
                "sampling_type": "scatter"}"#,
        );

        // Act
        let (linear, linear_warnings) = Dimension::from_spec(&linear).unwrap();
        let (exotic, exotic_warnings) = Dimension::from_spec(&exotic).unwrap();

        // Assert
        assert_eq!(linear.quantity_name(), Some("time"));
        assert!(linear_warnings.is_empty());
        assert_eq!(exotic.quantity_name(), Some("dipolar coupling"));
        assert_eq!(exotic_warnings.len(), 1);
        assert_eq!(exotic.sampling_type(), SamplingType::Scatter);
    }

    #[test]
    // Purpose
    // -------
    // Verify sampling-type validation: unknown keywords fail, and scatter
    // is rejected on a linear grid.
    //
    // Given
    // -----
    // - A monotonic spec with "scattered"; a linear spec with "scatter".
    //
    // Expect
    // ------
    // - InvalidSamplingType and UnsupportedOperation respectively.
    fn dimension_from_spec_validates_sampling_type() {
        // Arrange
        let misspelled =
            spec_from_json(r#"{"values": ["1 s", "2 s"], "sampling_type": "scattered"}"#);
        let linear_scatter = spec_from_json(
            r#"{"number_of_points": 3, "sampling_interval": "1 s", "sampling_type": "scatter"}"#,
        );

        // Act / Assert
        assert_eq!(
            Dimension::from_spec(&misspelled).unwrap_err(),
            DimensionError::InvalidSamplingType { keyword: "scattered".to_string() }
        );
        assert!(matches!(
            Dimension::from_spec(&linear_scatter).unwrap_err(),
            DimensionError::UnsupportedOperation { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the spec round trip for all three variants and the
    // minimality of the emitted form.
    //
    // Given
    // -----
    // - A linear dimension with offsets and a reciprocal override; a
    //   reversed scatter monotonic dimension; a labeled dimension.
    //
    // Expect
    // ------
    // - from_spec(to_spec(d)) equals d for each; a default-heavy linear
    //   dimension emits only count and interval.
    fn dimension_spec_round_trip_preserves_all_variants() {
        // Arrange
        let rich = spec_from_json(
            r#"{
                "number_of_points": 6,
                "sampling_interval": "1 ms",
                "reference_offset": "2 ms",
                "origin_offset": "10 ms",
                "reverse": true,
                "label": "t1",
                "period": "60 ms",
                "reciprocal": {"sampling_interval": "2 kHz", "reference_offset": "0.5 kHz"}
            }"#,
        );
        let scatter = spec_from_json(
            r#"{"values": ["10 cm", "0.5 m"], "sampling_type": "scatter", "reverse": true}"#,
        );
        let labeled = spec_from_json(
            r#"{"values": ["Cu", "Ag"], "non_quantitative": true, "label": "metal"}"#,
        );
        let plain = spec_from_json(r#"{"number_of_points": 4, "sampling_interval": "1 s"}"#);

        for spec in [rich, scatter, labeled] {
            // Act
            let (dimension, _) = Dimension::from_spec(&spec).unwrap();
            let (rebuilt, _) = Dimension::from_spec(&dimension.to_spec()).unwrap();

            // Assert
            assert_eq!(rebuilt, dimension);
        }

        // Assert minimality
        let (plain, _) = Dimension::from_spec(&plain).unwrap();
        let emitted = serde_json::to_value(plain.to_spec()).unwrap();
        let object = emitted.as_object().unwrap();
        assert_eq!(object.len(), 2, "unexpected keys in {object:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify UnsupportedOperation dispatch on the quantitative surface.
    //
    // Given
    // -----
    // - A labeled dimension and a monotonic dimension.
    //
    // Expect
    // ------
    // - coordinates/absolute/reciprocal/to_reciprocal fail on labels;
    //   to_reciprocal fails on monotonic; labels() fails on monotonic.
    fn dimension_dispatch_reports_unsupported_operations() {
        // Arrange
        let (mut labeled, _) = Dimension::from_spec(&spec_from_json(
            r#"{"values": ["a", "b"], "non_quantitative": true}"#,
        ))
        .unwrap();
        let (mut monotonic, _) =
            Dimension::from_spec(&spec_from_json(r#"{"values": ["1 s", "2 s"]}"#)).unwrap();

        // Act / Assert
        let unsupported =
            |err: DimensionError| matches!(err, DimensionError::UnsupportedOperation { .. });
        assert!(unsupported(labeled.coordinates().unwrap_err()));
        assert!(unsupported(labeled.absolute_coordinates().unwrap_err()));
        assert!(unsupported(labeled.reciprocal_coordinates().unwrap_err()));
        assert!(unsupported(labeled.to_reciprocal().unwrap_err()));
        assert!(unsupported(monotonic.to_reciprocal().unwrap_err()));
        assert!(unsupported(monotonic.labels().unwrap_err()));
        assert!(monotonic.coordinates().is_ok());
    }
}
