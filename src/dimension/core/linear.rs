//! Linear grid dimensions and their Fourier-dual mirror state.
//!
//! Purpose
//! -------
//! Implement the uniformly sampled dimension variant: `count` points spaced
//! by a positive `interval`, shifted by a `reference_offset`, optionally
//! displayed reversed, in FFT bin order, or as a dimensionless ratio. Every
//! linear dimension carries a full reciprocal parameter set so the axis can
//! be swapped with its Fourier dual in place.
//!
//! Key behaviors
//! -------------
//! - Coordinates are cached and re-derived atomically by every mutator:
//!   index order (natural or FFT bin order) × interval − reference offset,
//!   reversed last, then optionally divided by
//!   `origin_offset + reference_offset` for dimensionless display.
//! - Reciprocal coordinates follow the canonical centering rule: centered
//!   indexes (`j - floor(count/2)`) while the forward dimension is *not* in
//!   FFT output order, natural ascending indexes when it is.
//! - [`LinearDimension::to_reciprocal`] swaps every forward/reciprocal
//!   field pairwise, toggles `fft_output_order`, and re-derives both
//!   coordinate caches from the swapped fields; it is an involution.
//!
//! Invariants & assumptions
//! ------------------------
//! - `count ≥ 1`; `interval.magnitude() > 0`; offsets and periods share the
//!   interval's physical type (checked eagerly on both sides).
//! - Cached coordinate arrays are pure functions of the stored fields;
//!   mutators stage the complete new state and commit in one assignment,
//!   so a failed derivation leaves the dimension untouched.
//! - The reciprocal side's `made_dimensionless` flag takes effect only
//!   after a swap makes it the forward presentation; the dual display and
//!   the fft phase ramp always see unitful reciprocal coordinates.
//!
//! Conventions
//! -----------
//! - Coordinate magnitudes are expressed in the interval's unit (or as pure
//!   ratios once made dimensionless); offsets supplied in any compatible
//!   unit are converted during derivation.
//! - `reciprocal.interval` defaults to `1 / (count × interval)`; an
//!   explicit value must be unit-consistent with the inverse interval.
//!   `set_count` re-derives coordinates but never rewrites the stored
//!   reciprocal interval.

use ndarray::{Array1, ArrayView1};

use crate::dimension::core::indexes::{centered_indexes, fft_output_indexes, natural_indexes};
use crate::dimension::errors::{DimensionError, DimensionResult};
use crate::units::consistency::{check_consistency, default_or_check};
use crate::units::quantity::{CompositeUnit, Quantity};

/// Caller-supplied reciprocal-side overrides for a linear dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReciprocalOptions {
    pub interval: Option<Quantity>,
    pub reference_offset: Option<Quantity>,
    pub origin_offset: Option<Quantity>,
    pub made_dimensionless: bool,
    pub reverse: bool,
    pub period: Option<Quantity>,
    pub quantity_name: Option<String>,
    pub label: String,
}

/// Caller-supplied options for [`LinearDimension::new`]; every field has a
/// neutral default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearOptions {
    pub label: String,
    pub reference_offset: Option<Quantity>,
    pub origin_offset: Option<Quantity>,
    pub made_dimensionless: bool,
    pub reverse: bool,
    pub fft_output_order: bool,
    pub period: Option<Quantity>,
    pub quantity_name: Option<String>,
    pub reciprocal: ReciprocalOptions,
}

/// Validated reciprocal-side state mirroring the forward field shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReciprocalParams {
    interval: Quantity,
    reference_offset: Quantity,
    origin_offset: Quantity,
    made_dimensionless: bool,
    reverse: bool,
    period: Option<Quantity>,
    quantity_name: String,
    label: String,
}

impl ReciprocalParams {
    pub fn interval(&self) -> &Quantity {
        &self.interval
    }

    pub fn reference_offset(&self) -> &Quantity {
        &self.reference_offset
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

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A uniformly sampled quantitative dimension with a swappable Fourier dual.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDimension {
    label: String,
    count: usize,
    interval: Quantity,
    reference_offset: Quantity,
    origin_offset: Quantity,
    made_dimensionless: bool,
    reverse: bool,
    fft_output_order: bool,
    period: Option<Quantity>,
    quantity_name: String,
    reciprocal: ReciprocalParams,
    coordinates: Array1<f64>,
    reciprocal_coordinates: Array1<f64>,
}

/// Displayed forward magnitudes in the interval's unit (or as ratios).
fn forward_magnitudes(
    label: &str,
    count: usize,
    interval: &Quantity,
    reference_offset: &Quantity,
    origin_offset: &Quantity,
    fft_output_order: bool,
    reverse: bool,
    made_dimensionless: bool,
) -> DimensionResult<Array1<f64>> {
    let indexes =
        if fft_output_order { fft_output_indexes(count) } else { natural_indexes(count) };
    let step = interval.magnitude();
    let offset = reference_offset.to(interval.unit())?.magnitude();
    let mut values: Vec<f64> = indexes.iter().map(|&j| j as f64 * step - offset).collect();
    if reverse {
        values.reverse();
    }
    if made_dimensionless {
        let divisor = origin_offset.try_add(reference_offset)?.to(interval.unit())?.magnitude();
        if divisor == 0.0 {
            return Err(DimensionError::DivisionByZero { label: label.to_string() });
        }
        for value in &mut values {
            *value /= divisor;
        }
    }
    Ok(Array1::from(values))
}

/// Dual-axis magnitudes in the reciprocal interval's unit.
fn reciprocal_magnitudes(
    count: usize,
    forward_fft_output_order: bool,
    reciprocal: &ReciprocalParams,
) -> DimensionResult<Array1<f64>> {
    let indexes =
        if forward_fft_output_order { natural_indexes(count) } else { centered_indexes(count) };
    let step = reciprocal.interval.magnitude();
    let offset =
        reciprocal.reference_offset.to(reciprocal.interval.unit())?.magnitude();
    let mut values: Vec<f64> = indexes.iter().map(|&j| j as f64 * step - offset).collect();
    if reciprocal.reverse {
        values.reverse();
    }
    Ok(Array1::from(values))
}

impl LinearDimension {
    /// Build a linear dimension, validating every field eagerly.
    ///
    /// Purpose
    /// -------
    /// The single constructor: checks the count and interval invariants,
    /// defaults or checks the offsets and period on both the forward and
    /// reciprocal sides, derives the reciprocal interval when absent, and
    /// caches both coordinate arrays.
    ///
    /// Parameters
    /// ----------
    /// - `count`: number of grid points, at least 1.
    /// - `interval`: sampling interval; strictly positive magnitude.
    /// - `options`: remaining fields, all optional. `quantity_name` values
    ///   are stored as given; resolution against the unit's physical type
    ///   happens at the specification boundary.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::ZeroCount`] / [`DimensionError::NonPositiveInterval`]
    ///   on invariant violations.
    /// - [`DimensionError::Units`] when an offset, period, or explicit
    ///   reciprocal interval has an incompatible physical type.
    /// - [`DimensionError::DivisionByZero`] when `made_dimensionless` is
    ///   requested with a zero offset sum.
    pub fn new(
        count: usize,
        interval: Quantity,
        options: LinearOptions,
    ) -> DimensionResult<LinearDimension> {
        if count == 0 {
            return Err(DimensionError::ZeroCount);
        }
        if interval.magnitude() <= 0.0 {
            return Err(DimensionError::NonPositiveInterval { value: interval.magnitude() });
        }
        let unit = interval.unit().clone();
        let reference_offset = default_or_check(options.reference_offset.as_ref(), &unit)?;
        let origin_offset = default_or_check(options.origin_offset.as_ref(), &unit)?;
        let period = match options.period {
            Some(period) => Some(check_consistency(&period, &unit)?),
            None => None,
        };
        let quantity_name =
            options.quantity_name.unwrap_or_else(|| unit.physical_type().to_string());

        let dual_unit = unit.recip();
        let reciprocal_interval = match options.reciprocal.interval {
            Some(value) => check_consistency(&value, &dual_unit)?,
            None => interval.scaled(count as f64)?.recip()?,
        };
        let reciprocal_unit = reciprocal_interval.unit().clone();
        let reciprocal = ReciprocalParams {
            reference_offset: default_or_check(
                options.reciprocal.reference_offset.as_ref(),
                &reciprocal_unit,
            )?,
            origin_offset: default_or_check(
                options.reciprocal.origin_offset.as_ref(),
                &reciprocal_unit,
            )?,
            made_dimensionless: options.reciprocal.made_dimensionless,
            reverse: options.reciprocal.reverse,
            period: match options.reciprocal.period {
                Some(period) => Some(check_consistency(&period, &reciprocal_unit)?),
                None => None,
            },
            quantity_name: options
                .reciprocal
                .quantity_name
                .unwrap_or_else(|| reciprocal_unit.physical_type().to_string()),
            label: options.reciprocal.label,
            interval: reciprocal_interval,
        };

        let coordinates = forward_magnitudes(
            &options.label,
            count,
            &interval,
            &reference_offset,
            &origin_offset,
            options.fft_output_order,
            options.reverse,
            options.made_dimensionless,
        )?;
        let reciprocal_coordinates =
            reciprocal_magnitudes(count, options.fft_output_order, &reciprocal)?;

        Ok(LinearDimension {
            label: options.label,
            count,
            interval,
            reference_offset,
            origin_offset,
            made_dimensionless: options.made_dimensionless,
            reverse: options.reverse,
            fft_output_order: options.fft_output_order,
            period,
            quantity_name,
            reciprocal,
            coordinates,
            reciprocal_coordinates,
        })
    }

    // ---- Accessors --------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn interval(&self) -> &Quantity {
        &self.interval
    }

    pub fn reference_offset(&self) -> &Quantity {
        &self.reference_offset
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

    pub fn fft_output_order(&self) -> bool {
        self.fft_output_order
    }

    pub fn period(&self) -> Option<&Quantity> {
        self.period.as_ref()
    }

    pub fn quantity_name(&self) -> &str {
        &self.quantity_name
    }

    pub fn reciprocal(&self) -> &ReciprocalParams {
        &self.reciprocal
    }

    /// Displayed coordinate magnitudes, in [`Self::coordinates_unit`].
    pub fn coordinates(&self) -> ArrayView1<'_, f64> {
        self.coordinates.view()
    }

    /// Dual-axis coordinate magnitudes in the reciprocal interval's unit.
    pub fn reciprocal_coordinates(&self) -> ArrayView1<'_, f64> {
        self.reciprocal_coordinates.view()
    }

    /// Unit of the displayed coordinates: the interval's unit, or the pure
    /// number once made dimensionless.
    pub fn coordinates_unit(&self) -> CompositeUnit {
        if self.made_dimensionless {
            CompositeUnit::dimensionless()
        } else {
            self.interval.unit().clone()
        }
    }

    /// Unitful coordinates shifted by the origin offset.
    ///
    /// The origin offset is added to the unitful sequence, so this equals
    /// `coordinates() + origin_offset` exactly whenever the dimension is
    /// not in dimensionless display.
    pub fn absolute_coordinates(&self) -> DimensionResult<Array1<f64>> {
        let base = forward_magnitudes(
            &self.label,
            self.count,
            &self.interval,
            &self.reference_offset,
            &self.origin_offset,
            self.fft_output_order,
            self.reverse,
            false,
        )?;
        let origin = self.origin_offset.to(self.interval.unit())?.magnitude();
        Ok(base + origin)
    }

    /// Axis annotation: the label (or quantity name) with the display unit.
    pub fn axis_label(&self) -> String {
        let name = if self.label.is_empty() { &self.quantity_name } else { &self.label };
        let unit = self.coordinates_unit().to_string();
        if unit.is_empty() { name.to_string() } else { format!("{name} / ({unit})") }
    }

    // ---- Mutators (staged compute, single commit) -------------------------

    /// Resize the grid, re-deriving both coordinate caches.
    ///
    /// Growth and shrinkage are both fine on a linear grid; the stored
    /// reciprocal interval is left as-is.
    pub fn set_count(&mut self, count: usize) -> DimensionResult<()> {
        if count == 0 {
            return Err(DimensionError::ZeroCount);
        }
        let coordinates = forward_magnitudes(
            &self.label,
            count,
            &self.interval,
            &self.reference_offset,
            &self.origin_offset,
            self.fft_output_order,
            self.reverse,
            self.made_dimensionless,
        )?;
        let reciprocal_coordinates =
            reciprocal_magnitudes(count, self.fft_output_order, &self.reciprocal)?;
        self.count = count;
        self.coordinates = coordinates;
        self.reciprocal_coordinates = reciprocal_coordinates;
        Ok(())
    }

    /// Switch dimensionless display on or off.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::DivisionByZero`] when enabling with
    ///   `origin_offset + reference_offset == 0`; the dimension is left
    ///   unchanged.
    pub fn make_dimensionless(&mut self, dimensionless: bool) -> DimensionResult<()> {
        let coordinates = forward_magnitudes(
            &self.label,
            self.count,
            &self.interval,
            &self.reference_offset,
            &self.origin_offset,
            self.fft_output_order,
            self.reverse,
            dimensionless,
        )?;
        self.made_dimensionless = dimensionless;
        self.coordinates = coordinates;
        Ok(())
    }

    /// Swap the dimension with its Fourier dual in place.
    ///
    /// Purpose
    /// -------
    /// Exchange every forward/reciprocal field pairwise (interval, offsets,
    /// dimensionless and reverse flags, period, quantity name, label),
    /// toggle `fft_output_order`, and re-derive both coordinate caches
    /// from the swapped fields. Applying it twice restores the original
    /// state exactly.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::DivisionByZero`] when the reciprocal side asks
    ///   for dimensionless display with a zero offset sum; the swap is
    ///   aborted with no field touched.
    pub fn to_reciprocal(&mut self) -> DimensionResult<()> {
        let forward = ReciprocalParams {
            interval: self.interval.clone(),
            reference_offset: self.reference_offset.clone(),
            origin_offset: self.origin_offset.clone(),
            made_dimensionless: self.made_dimensionless,
            reverse: self.reverse,
            period: self.period.clone(),
            quantity_name: self.quantity_name.clone(),
            label: self.label.clone(),
        };
        let dual = self.reciprocal.clone();
        let fft_output_order = !self.fft_output_order;

        let coordinates = forward_magnitudes(
            &dual.label,
            self.count,
            &dual.interval,
            &dual.reference_offset,
            &dual.origin_offset,
            fft_output_order,
            dual.reverse,
            dual.made_dimensionless,
        )?;
        let reciprocal_coordinates =
            reciprocal_magnitudes(self.count, fft_output_order, &forward)?;

        *self = LinearDimension {
            label: dual.label,
            count: self.count,
            interval: dual.interval,
            reference_offset: dual.reference_offset,
            origin_offset: dual.origin_offset,
            made_dimensionless: dual.made_dimensionless,
            reverse: dual.reverse,
            fft_output_order,
            period: dual.period,
            quantity_name: dual.quantity_name,
            reciprocal: forward,
            coordinates,
            reciprocal_coordinates,
        };
        Ok(())
    }
}
