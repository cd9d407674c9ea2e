//! Arbitrarily sampled quantitative dimensions.
//!
//! Purpose
//! -------
//! Implement the monotonic dimension variant: an explicit, strictly
//! ascending sequence of coordinate quantities sharing one physical type.
//! Monotonic grids carry the model's sampling class (`grid` or `scatter`)
//! and support shrink-only resizing.
//!
//! Key behaviors
//! -------------
//! - All supplied values are converted into the first value's unit at
//!   construction; mixed physical types are rejected there.
//! - `coordinates()` applies `reverse` (and the dimensionless ratio when
//!   requested) to the stored ascending magnitudes; the displayed array is
//!   cached and re-derived by every mutator.
//! - There is no derived Fourier dual: reciprocal coordinates exist only
//!   when the caller supplies a fixed sequence of matching length, stored
//!   in declared order.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one value; strictly ascending after unit conversion.
//! - A supplied reciprocal sequence has exactly `count` values with the
//!   inverse physical type, and is truncated in step with `set_count`.
//! - `set_count` may only shrink; the kept values are a prefix of the
//!   declared ascending order, and the caller receives a
//!   [`TruncationWarning`] describing the shrink.

use ndarray::{Array1, ArrayView1};

use crate::dimension::errors::{DimensionError, DimensionResult, TruncationWarning};
use crate::units::consistency::{check_consistency, default_or_check};
use crate::units::quantity::{CompositeUnit, Quantity};

/// Sampling class a dimension contributes to the model-wide layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SamplingType {
    /// Points form one axis of a tensor grid.
    #[default]
    Grid,
    /// Points are per-sample coordinates of a flat point cloud.
    Scatter,
}

impl SamplingType {
    pub fn keyword(&self) -> &'static str {
        match self {
            SamplingType::Grid => "grid",
            SamplingType::Scatter => "scatter",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<SamplingType> {
        match keyword {
            "grid" => Some(SamplingType::Grid),
            "scatter" => Some(SamplingType::Scatter),
            _ => None,
        }
    }
}

/// Caller-supplied options for [`MonotonicDimension::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonotonicOptions {
    pub label: String,
    pub origin_offset: Option<Quantity>,
    pub made_dimensionless: bool,
    pub reverse: bool,
    pub period: Option<Quantity>,
    pub quantity_name: Option<String>,
    pub sampling_type: SamplingType,
    /// Fixed dual-axis coordinates; must match the value count and carry
    /// the inverse physical type.
    pub reciprocal_values: Option<Vec<Quantity>>,
}

/// A quantitative dimension sampled at explicit ascending coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotonicDimension {
    label: String,
    unit: CompositeUnit,
    magnitudes: Array1<f64>,
    origin_offset: Quantity,
    made_dimensionless: bool,
    reverse: bool,
    period: Option<Quantity>,
    quantity_name: String,
    sampling_type: SamplingType,
    reciprocal_unit: CompositeUnit,
    reciprocal_magnitudes: Option<Array1<f64>>,
    coordinates: Array1<f64>,
}

/// Displayed magnitudes: declared ascending order, reversed last, then the
/// optional dimensionless ratio against the origin offset.
fn displayed_magnitudes(
    label: &str,
    magnitudes: &Array1<f64>,
    unit: &CompositeUnit,
    origin_offset: &Quantity,
    reverse: bool,
    made_dimensionless: bool,
) -> DimensionResult<Array1<f64>> {
    let mut values = magnitudes.to_vec();
    if reverse {
        values.reverse();
    }
    if made_dimensionless {
        let divisor = origin_offset.to(unit)?.magnitude();
        if divisor == 0.0 {
            return Err(DimensionError::DivisionByZero { label: label.to_string() });
        }
        for value in &mut values {
            *value /= divisor;
        }
    }
    Ok(Array1::from(values))
}

impl MonotonicDimension {
    /// Build a monotonic dimension from explicit coordinate values.
    ///
    /// Purpose
    /// -------
    /// Convert every value into the first value's unit, enforce strict
    /// ascent, validate the offset/period/reciprocal inputs, and cache the
    /// displayed coordinates.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::EmptyValues`] when `values` is empty.
    /// - [`DimensionError::UnsortedValues`] naming the first index that
    ///   breaks strict ascent (after unit conversion).
    /// - [`DimensionError::ReciprocalLengthMismatch`] when a supplied
    ///   reciprocal sequence does not have exactly `values.len()` entries.
    /// - [`DimensionError::Units`] on any physical-type mismatch.
    pub fn new(
        values: &[Quantity],
        options: MonotonicOptions,
    ) -> DimensionResult<MonotonicDimension> {
        let first = values.first().ok_or(DimensionError::EmptyValues)?;
        let unit = first.unit().clone();
        let mut magnitudes = Vec::with_capacity(values.len());
        for value in values {
            magnitudes.push(value.to(&unit)?.magnitude());
        }
        for index in 1..magnitudes.len() {
            if magnitudes[index] <= magnitudes[index - 1] {
                return Err(DimensionError::UnsortedValues { index });
            }
        }
        let magnitudes = Array1::from(magnitudes);

        let origin_offset = default_or_check(options.origin_offset.as_ref(), &unit)?;
        let period = match options.period {
            Some(period) => Some(check_consistency(&period, &unit)?),
            None => None,
        };
        let quantity_name =
            options.quantity_name.unwrap_or_else(|| unit.physical_type().to_string());

        let (reciprocal_unit, reciprocal_magnitudes) = match options.reciprocal_values {
            None => (unit.recip(), None),
            Some(duals) => {
                if duals.len() != values.len() {
                    return Err(DimensionError::ReciprocalLengthMismatch {
                        expected: values.len(),
                        found: duals.len(),
                    });
                }
                let dual_unit = check_consistency(&duals[0], &unit.recip())?.unit().clone();
                let mut dual_magnitudes = Vec::with_capacity(duals.len());
                for dual in &duals {
                    dual_magnitudes.push(dual.to(&dual_unit)?.magnitude());
                }
                (dual_unit, Some(Array1::from(dual_magnitudes)))
            }
        };

        let coordinates = displayed_magnitudes(
            &options.label,
            &magnitudes,
            &unit,
            &origin_offset,
            options.reverse,
            options.made_dimensionless,
        )?;

        Ok(MonotonicDimension {
            label: options.label,
            unit,
            magnitudes,
            origin_offset,
            made_dimensionless: options.made_dimensionless,
            reverse: options.reverse,
            period,
            quantity_name,
            sampling_type: options.sampling_type,
            reciprocal_unit,
            reciprocal_magnitudes,
            coordinates,
        })
    }

    // ---- Accessors --------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> usize {
        self.magnitudes.len()
    }

    /// Unit the stored magnitudes are expressed in (the first supplied
    /// value's unit).
    pub fn unit(&self) -> &CompositeUnit {
        &self.unit
    }

    pub fn origin_offset(&self) -> &Quantity {
        &self.origin_offset
    }

    pub fn made_dimensionless(&self) -> bool {
        self.made_dimensionless
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn period(&self) -> Option<&Quantity> {
        self.period.as_ref()
    }

    pub fn quantity_name(&self) -> &str {
        &self.quantity_name
    }

    pub fn sampling_type(&self) -> SamplingType {
        self.sampling_type
    }

    pub fn reciprocal_unit(&self) -> &CompositeUnit {
        &self.reciprocal_unit
    }

    /// Declared ascending magnitudes in [`Self::unit`], before any display
    /// transform.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.magnitudes.view()
    }

    /// Displayed coordinate magnitudes, in [`Self::coordinates_unit`].
    pub fn coordinates(&self) -> ArrayView1<'_, f64> {
        self.coordinates.view()
    }

    /// The caller-supplied dual-axis sequence, in declared order.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::UnsupportedOperation`] when no sequence was
    ///   supplied; an arbitrary grid has no derivable Fourier dual.
    pub fn reciprocal_coordinates(&self) -> DimensionResult<ArrayView1<'_, f64>> {
        match &self.reciprocal_magnitudes {
            Some(duals) => Ok(duals.view()),
            None => Err(DimensionError::UnsupportedOperation {
                operation: "reciprocal_coordinates",
                kind: "monotonic",
            }),
        }
    }

    pub fn coordinates_unit(&self) -> CompositeUnit {
        if self.made_dimensionless {
            CompositeUnit::dimensionless()
        } else {
            self.unit.clone()
        }
    }

    /// Unitful coordinates shifted by the origin offset.
    pub fn absolute_coordinates(&self) -> DimensionResult<Array1<f64>> {
        let base = displayed_magnitudes(
            &self.label,
            &self.magnitudes,
            &self.unit,
            &self.origin_offset,
            self.reverse,
            false,
        )?;
        let origin = self.origin_offset.to(&self.unit)?.magnitude();
        Ok(base + origin)
    }

    /// Axis annotation: the label (or quantity name) with the display unit.
    pub fn axis_label(&self) -> String {
        let name = if self.label.is_empty() { &self.quantity_name } else { &self.label };
        let unit = self.coordinates_unit().to_string();
        if unit.is_empty() { name.to_string() } else { format!("{name} / ({unit})") }
    }

    // ---- Mutators (staged compute, single commit) -------------------------

    /// Shrink the grid to its first `count` declared values.
    ///
    /// Returns
    /// -------
    /// `Some(TruncationWarning)` when values were dropped, `None` when the
    /// count is unchanged.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::ZeroCount`] for a zero target.
    /// - [`DimensionError::CountIncrease`] when asked to grow; an arbitrary
    ///   grid has no rule for inventing new values.
    pub fn set_count(&mut self, count: usize) -> DimensionResult<Option<TruncationWarning>> {
        let current = self.count();
        if count == 0 {
            return Err(DimensionError::ZeroCount);
        }
        if count > current {
            return Err(DimensionError::CountIncrease { requested: count, current });
        }
        if count == current {
            return Ok(None);
        }
        let magnitudes = Array1::from_iter(self.magnitudes.iter().copied().take(count));
        let reciprocal_magnitudes = self
            .reciprocal_magnitudes
            .as_ref()
            .map(|duals| Array1::from_iter(duals.iter().copied().take(count)));
        let coordinates = displayed_magnitudes(
            &self.label,
            &magnitudes,
            &self.unit,
            &self.origin_offset,
            self.reverse,
            self.made_dimensionless,
        )?;
        self.magnitudes = magnitudes;
        self.reciprocal_magnitudes = reciprocal_magnitudes;
        self.coordinates = coordinates;
        Ok(Some(TruncationWarning { from: current, to: count }))
    }

    /// Switch dimensionless display on or off.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::DivisionByZero`] when enabling with a zero
    ///   origin offset; the dimension is left unchanged.
    pub fn make_dimensionless(&mut self, dimensionless: bool) -> DimensionResult<()> {
        let coordinates = displayed_magnitudes(
            &self.label,
            &self.magnitudes,
            &self.unit,
            &self.origin_offset,
            self.reverse,
            dimensionless,
        )?;
        self.made_dimensionless = dimensionless;
        self.coordinates = coordinates;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Unit normalization into the first value's unit and the strict
    //   ascent check.
    // - Reverse display, absolute coordinates, dimensionless display.
    // - Shrink-only set_count with its warning, including the supplied
    //   reciprocal sequence.
    //
    // They intentionally DO NOT cover:
    // - Sampling-class mixing across dimensions (model tests).
    // -------------------------------------------------------------------------

    fn quantities(texts: &[&str]) -> Vec<Quantity> {
        texts.iter().map(|text| Quantity::parse(text).unwrap()).collect()
    }

    fn close(a: ArrayView1<'_, f64>, b: &[f64]) {
        assert_eq!(a.len(), b.len(), "length mismatch: {a:?} vs {b:?}");
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "expected {b:?}, got {a:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify values are converted into the first value's unit and kept in
    // declared ascending order.
    //
    // Given
    // -----
    // - Values ["10 cm", "0.5 m", "1 m"].
    //
    // Expect
    // ------
    // - Coordinates [10, 50, 100] with unit "cm".
    fn monotonic_dimension_normalizes_values_into_the_first_unit() {
        // Arrange / Act
        let dim =
            MonotonicDimension::new(&quantities(&["10 cm", "0.5 m", "1 m"]), MonotonicOptions::default())
                .unwrap();

        // Assert
        close(dim.coordinates(), &[10.0, 50.0, 100.0]);
        assert_eq!(dim.unit().to_string(), "cm");
        assert_eq!(dim.count(), 3);
        assert_eq!(dim.quantity_name(), "length");
    }

    #[test]
    // Purpose
    // -------
    // Verify rejection of empty, non-ascending, and mixed-type inputs.
    //
    // Given
    // -----
    // - No values; a repeated value; a seconds value on a metre axis.
    //
    // Expect
    // ------
    // - EmptyValues, UnsortedValues at index 1, and a Units error.
    fn monotonic_dimension_rejects_invalid_value_sequences() {
        // Act
        let empty = MonotonicDimension::new(&[], MonotonicOptions::default());
        let repeated =
            MonotonicDimension::new(&quantities(&["1 m", "1 m"]), MonotonicOptions::default());
        let mixed =
            MonotonicDimension::new(&quantities(&["1 m", "2 s"]), MonotonicOptions::default());

        // Assert
        assert_eq!(empty.unwrap_err(), DimensionError::EmptyValues);
        assert_eq!(repeated.unwrap_err(), DimensionError::UnsortedValues { index: 1 });
        assert!(matches!(mixed.unwrap_err(), DimensionError::Units(_)));
    }

    #[test]
    // Purpose
    // -------
    // Verify reverse display and the origin shift of absolute coordinates.
    //
    // Given
    // -----
    // - Values [1, 2, 4] s, reverse = true, origin offset = 10 s.
    //
    // Expect
    // ------
    // - Coordinates [4, 2, 1]; absolute coordinates [14, 12, 11].
    fn monotonic_dimension_reverses_display_and_shifts_absolute() {
        // Arrange / Act
        let dim = MonotonicDimension::new(
            &quantities(&["1 s", "2 s", "4 s"]),
            MonotonicOptions {
                reverse: true,
                origin_offset: Some(Quantity::parse("10 s").unwrap()),
                ..MonotonicOptions::default()
            },
        )
        .unwrap();

        // Assert
        close(dim.coordinates(), &[4.0, 2.0, 1.0]);
        close(dim.absolute_coordinates().unwrap().view(), &[14.0, 12.0, 11.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify dimensionless display against the origin offset and the
    // atomic failure when the origin is zero.
    //
    // Given
    // -----
    // - Values [1, 2, 4] s with origin 2 s; the same values with no origin.
    //
    // Expect
    // ------
    // - Ratios [0.5, 1, 2]; the zero-origin call errors and changes
    //   nothing.
    fn monotonic_dimension_dimensionless_divides_by_origin_or_fails_atomically() {
        // Arrange
        let mut dim = MonotonicDimension::new(
            &quantities(&["1 s", "2 s", "4 s"]),
            MonotonicOptions {
                origin_offset: Some(Quantity::parse("2 s").unwrap()),
                ..MonotonicOptions::default()
            },
        )
        .unwrap();
        let mut zero =
            MonotonicDimension::new(&quantities(&["1 s", "2 s", "4 s"]), MonotonicOptions::default())
                .unwrap();
        let before = zero.clone();

        // Act
        dim.make_dimensionless(true).unwrap();
        let err = zero.make_dimensionless(true).unwrap_err();

        // Assert
        close(dim.coordinates(), &[0.5, 1.0, 2.0]);
        assert!(dim.coordinates_unit().is_dimensionless());
        assert!(matches!(err, DimensionError::DivisionByZero { .. }));
        assert_eq!(zero, before);
    }

    #[test]
    // Purpose
    // -------
    // Verify shrink-only resizing: growth fails, shrink truncates the
    // declared order (and the reciprocal sequence) with a warning.
    //
    // Given
    // -----
    // - Four seconds values with a four-value Hz reciprocal sequence.
    //
    // Expect
    // ------
    // - set_count(6) → CountIncrease; set_count(4) → None;
    //   set_count(2) → warning {from: 4, to: 2} and two kept values on
    //   both sides.
    fn monotonic_dimension_set_count_truncates_but_never_grows() {
        // Arrange
        let mut dim = MonotonicDimension::new(
            &quantities(&["1 s", "2 s", "4 s", "8 s"]),
            MonotonicOptions {
                reciprocal_values: Some(quantities(&["1 Hz", "2 Hz", "4 Hz", "8 Hz"])),
                ..MonotonicOptions::default()
            },
        )
        .unwrap();

        // Act / Assert
        assert_eq!(
            dim.set_count(6).unwrap_err(),
            DimensionError::CountIncrease { requested: 6, current: 4 }
        );
        assert_eq!(dim.set_count(4).unwrap(), None);
        let warning = dim.set_count(2).unwrap().unwrap();
        assert_eq!(warning, TruncationWarning { from: 4, to: 2 });
        close(dim.coordinates(), &[1.0, 2.0]);
        close(dim.reciprocal_coordinates().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify supplied-reciprocal validation and the unsupported-dual
    // fallback.
    //
    // Given
    // -----
    // - A three-value reciprocal sequence on a four-value grid; a grid
    //   with no reciprocal sequence; a metre-valued reciprocal sequence on
    //   a seconds axis.
    //
    // Expect
    // ------
    // - ReciprocalLengthMismatch {expected: 4, found: 3}; an
    //   UnsupportedOperation from reciprocal_coordinates(); a Units error.
    fn monotonic_dimension_validates_supplied_reciprocal_sequences() {
        // Act
        let short = MonotonicDimension::new(
            &quantities(&["1 s", "2 s", "4 s", "8 s"]),
            MonotonicOptions {
                reciprocal_values: Some(quantities(&["1 Hz", "2 Hz", "4 Hz"])),
                ..MonotonicOptions::default()
            },
        );
        let bare = MonotonicDimension::new(
            &quantities(&["1 s", "2 s"]),
            MonotonicOptions { sampling_type: SamplingType::Scatter, ..MonotonicOptions::default() },
        )
        .unwrap();
        let mistyped = MonotonicDimension::new(
            &quantities(&["1 s", "2 s"]),
            MonotonicOptions {
                reciprocal_values: Some(quantities(&["1 m", "2 m"])),
                ..MonotonicOptions::default()
            },
        );

        // Assert
        assert_eq!(
            short.unwrap_err(),
            DimensionError::ReciprocalLengthMismatch { expected: 4, found: 3 }
        );
        assert_eq!(bare.sampling_type(), SamplingType::Scatter);
        assert!(matches!(
            bare.reciprocal_coordinates().unwrap_err(),
            DimensionError::UnsupportedOperation { .. }
        ));
        assert!(matches!(mistyped.unwrap_err(), DimensionError::Units(_)));
    }
}
