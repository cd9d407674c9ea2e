//! dimension::spec — serde wire objects for dimension specifications.
//!
//! Purpose
//! -------
//! Define the JSON shape of a dimension entry: one flat key set shared by
//! all three variants plus a nested `reciprocal` override block. Which
//! variant a specification selects is decided by key presence in
//! [`crate::dimension::Dimension::from_spec`]; this module only carries
//! the data.
//!
//! Conventions
//! -----------
//! - Quantity-valued keys hold quantity strings (`"100 Hz"`); they parse
//!   eagerly during deserialization through [`Quantity`]'s string form.
//! - Every key is optional on the wire. Serialization skips keys holding
//!   their default value, so emitted JSON stays minimal.
//! - Unknown keys are rejected (`deny_unknown_fields`) so typos fail
//!   loudly instead of silently deserializing to defaults.

use serde::{Deserialize, Serialize};

use crate::units::quantity::{CompositeUnit, Quantity};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Quantity string in the canonical display form.
pub(crate) fn quantity_text(magnitude: f64, unit: &CompositeUnit) -> String {
    if unit.factors().is_empty() {
        format!("{magnitude}")
    } else {
        format!("{magnitude} {unit}")
    }
}

/// Reciprocal-side overrides nested under a dimension's `reciprocal` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReciprocalSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_interval: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_offset: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_offset: Option<Quantity>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub made_dimensionless: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl ReciprocalSpec {
    /// True when every field holds its default, so the whole block can be
    /// dropped from emitted JSON.
    pub fn is_default(&self) -> bool {
        *self == ReciprocalSpec::default()
    }
}

/// One dimension entry of the wire format.
///
/// Key presence selects the variant: `number_of_points` +
/// `sampling_interval` describe a linear grid, `values` an arbitrary grid
/// (or, with `non_quantitative`, a labeled dimension).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_points: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_interval: Option<Quantity>,
    /// Quantity strings for an arbitrary grid, category strings for a
    /// labeled dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub non_quantitative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_offset: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_offset: Option<Quantity>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub made_dimensionless: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fft_output_order: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reciprocal: Option<ReciprocalSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Deserialization of a linear specification with a nested reciprocal
    //   block, including eager quantity-string parsing.
    // - Rejection of unknown keys and malformed quantity strings.
    // - Default-skipping on serialization.
    //
    // They intentionally DO NOT cover:
    // - Variant dispatch (dimension::kind tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify a full linear specification deserializes with parsed
    // quantities and the nested reciprocal block.
    //
    // Given
    // -----
    // - JSON with number_of_points, sampling_interval, flags, and a
    //   reciprocal override.
    //
    // Expect
    // ------
    // - Parsed magnitudes/units and populated reciprocal fields.
    fn dimension_spec_deserializes_linear_keys_and_reciprocal() {
        // Arrange
        let text = r#"{
            "number_of_points": 8,
            "sampling_interval": "2 ms",
            "reference_offset": "-1 ms",
            "fft_output_order": true,
            "label": "time",
            "reciprocal": {"quantity": "frequency", "reference_offset": "100 Hz"}
        }"#;

        // Act
        let spec: DimensionSpec = serde_json::from_str(text).unwrap();

        // Assert
        assert_eq!(spec.number_of_points, Some(8));
        let interval = spec.sampling_interval.unwrap();
        assert!((interval.magnitude() - 2.0).abs() < 1e-15);
        assert_eq!(interval.unit().to_string(), "ms");
        assert!(spec.fft_output_order);
        assert_eq!(spec.label, "time");
        let reciprocal = spec.reciprocal.unwrap();
        assert_eq!(reciprocal.quantity.as_deref(), Some("frequency"));
        assert_eq!(reciprocal.reference_offset.unwrap().unit().to_string(), "Hz");
    }

    #[test]
    // Purpose
    // -------
    // Verify unknown keys and malformed quantity strings fail
    // deserialization eagerly.
    //
    // Given
    // -----
    // - JSON with a misspelled key; JSON with an unparseable interval.
    //
    // Expect
    // ------
    // - Both fail; the quantity failure names the bad symbol.
    fn dimension_spec_rejects_unknown_keys_and_bad_quantities() {
        // Act
        let typo: Result<DimensionSpec, _> =
            serde_json::from_str(r#"{"number_of_pointz": 8}"#);
        let bad_unit: Result<DimensionSpec, _> =
            serde_json::from_str(r#"{"sampling_interval": "2 blorp"}"#);

        // Assert
        assert!(typo.is_err());
        let message = bad_unit.unwrap_err().to_string();
        assert!(message.contains("blorp"), "expected the bad symbol in {message:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify serialization drops keys holding defaults.
    //
    // Given
    // -----
    // - A spec with only count and interval set.
    //
    // Expect
    // ------
    // - Exactly two keys in the emitted object.
    fn dimension_spec_serialization_skips_defaults() {
        // Arrange
        let spec = DimensionSpec {
            number_of_points: Some(5),
            sampling_interval: Some(Quantity::parse("1 s").unwrap()),
            ..DimensionSpec::default()
        };

        // Act
        let value = serde_json::to_value(&spec).unwrap();

        // Assert
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2, "unexpected keys in {object:?}");
        assert_eq!(object["sampling_interval"], "1 s");
    }
}
