//! dataset::dataset — the uncontrolled-variable container.
//!
//! Purpose
//! -------
//! Tie a typed channel buffer to its physical metadata (unit, quantity
//! name, per-channel labels) and its serialization policy (encoding,
//! external payload reference), and translate between datasets and their
//! wire specifications ([`DatasetSpec`]).
//!
//! Key behaviors
//! -------------
//! - Keyword fields parse eagerly at absorption: numeric type, dataset
//!   type, and encoding strings become their closed vocabularies, and the
//!   quantity name resolves against the unit's physical type (unverifiable
//!   names surface as warning values).
//! - The payload carrier must match the declared encoding: nested numbers
//!   for `none`, per-channel strings for `base64`, a `components_URI` plus
//!   caller-supplied bytes for `raw`.
//! - `to_spec` emits the minimal wire form and, for raw datasets, returns
//!   the payload bytes separately so callers own the sidecar write.
//!
//! Invariants & assumptions
//! ------------------------
//! - The buffer's channel count always equals the dataset type's; every
//!   constructor and `replace_components` enforce this.
//! - `component_labels.len()` equals the channel count, padding with empty
//!   strings when the specification omits labels.
//! - The numeric type is never stored: it derives from the buffer, so a
//!   transform that widens the data (such as a Fourier transform) updates
//!   it automatically.
//!
//! Conventions
//! -----------
//! - An absent or empty `unit` string means dimensionless; an absent
//!   `dataset_type` means scalar; an absent `encoding` means `none`.

use crate::dataset::core::buffer::ComponentsArray;
use crate::dataset::core::codec::{
    decode_base64, decode_inline, decode_raw, encode_base64, encode_inline, encode_raw,
};
use crate::dataset::core::dataset_type::DatasetType;
use crate::dataset::core::encoding::Encoding;
use crate::dataset::core::numeric_type::NumericType;
use crate::dataset::errors::{DatasetError, DatasetResult};
use crate::dataset::spec::{DatasetSpec, WireComponents};
use crate::units::consistency::resolve_quantity_name;
use crate::units::errors::QuantityNameWarning;
use crate::units::quantity::CompositeUnit;

/// Construction-time choices for [`Dataset::new`]; every field has a
/// neutral default.
#[derive(Debug, Clone, Default)]
pub struct DatasetOptions {
    pub name: String,
    /// `None` means dimensionless.
    pub unit: Option<CompositeUnit>,
    /// `None` derives the name from the unit's physical type.
    pub quantity: Option<String>,
    pub encoding: Encoding,
    /// `None` means scalar, so the buffer must hold one channel.
    pub dataset_type: Option<DatasetType>,
    /// `None` pads with one empty label per channel.
    pub component_labels: Option<Vec<String>>,
}

/// One uncontrolled variable: a typed channel buffer with physical
/// metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    unit: CompositeUnit,
    quantity_name: String,
    component_labels: Vec<String>,
    encoding: Encoding,
    dataset_type: DatasetType,
    components: ComponentsArray,
    components_uri: Option<String>,
}

impl Dataset {
    /// Build a dataset around an existing buffer.
    ///
    /// Parameters
    /// ----------
    /// - `components`: channel-major sample buffer; its channel count must
    ///   match the dataset type's.
    /// - `options`: metadata and serialization choices; see
    ///   [`DatasetOptions`].
    ///
    /// Returns
    /// -------
    /// - The dataset and, when the quantity name could not be verified
    ///   against the unit, a non-fatal [`QuantityNameWarning`].
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::ComponentCountMismatch`] when the buffer's
    ///   channels disagree with the dataset type.
    /// - [`DatasetError::LabelCountMismatch`] when labels are supplied but
    ///   their count disagrees with the channel count.
    /// - [`DatasetError::Units`] when the quantity name contradicts the
    ///   unit's known physical type.
    pub fn new(
        components: ComponentsArray,
        options: DatasetOptions,
    ) -> DatasetResult<(Dataset, Option<QuantityNameWarning>)> {
        let dataset_type = options.dataset_type.unwrap_or(DatasetType::Scalar);
        let expected = dataset_type.channel_count();
        let found = components.channel_count();
        if found != expected {
            return Err(DatasetError::ComponentCountMismatch { expected, found });
        }

        let unit = options.unit.unwrap_or_else(CompositeUnit::dimensionless);
        let (quantity_name, warning) = resolve_quantity_name(options.quantity.as_deref(), &unit)?;

        let component_labels = match options.component_labels {
            None => vec![String::new(); expected],
            Some(labels) if labels.len() != expected => {
                return Err(DatasetError::LabelCountMismatch { expected, found: labels.len() });
            }
            Some(labels) => labels,
        };

        let dataset = Dataset {
            name: options.name,
            unit,
            quantity_name,
            component_labels,
            encoding: options.encoding,
            dataset_type,
            components,
            components_uri: None,
        };
        Ok((dataset, warning))
    }

    /// Absorb a wire specification, decoding its payload.
    ///
    /// Key behaviors
    /// -------------
    /// - `raw_payload` supplies the external blob for raw datasets (the
    ///   bytes behind `components_URI`); it is ignored for the other
    ///   encodings.
    /// - The payload carrier must match the declared encoding; a
    ///   `components` key of the wrong shape, or one combined with
    ///   `components_URI`, fails with [`DatasetError::InvalidEncoding`].
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::MissingField`] when `numeric_type`, `components`,
    ///   or (for raw) `components_URI` is absent.
    /// - [`DatasetError::MissingPayload`] when a raw specification names a
    ///   URI but no bytes were supplied.
    /// - Any codec error from the payload itself.
    pub fn from_spec(
        spec: &DatasetSpec,
        raw_payload: Option<&[u8]>,
    ) -> DatasetResult<(Dataset, Option<QuantityNameWarning>)> {
        let keyword = spec
            .numeric_type
            .as_deref()
            .ok_or(DatasetError::MissingField { field: "numeric_type" })?;
        let numeric_type = NumericType::parse(keyword)?;
        let dataset_type = match spec.dataset_type.as_deref() {
            None => DatasetType::Scalar,
            Some(keyword) => DatasetType::parse(keyword)?,
        };
        let encoding = match spec.encoding.as_deref() {
            None => Encoding::None,
            Some(keyword) => Encoding::parse(keyword)?,
        };
        let channel_count = dataset_type.channel_count();

        if spec.components_uri.is_some() && encoding != Encoding::Raw {
            return Err(DatasetError::InvalidEncoding {
                detail: format!(
                    "components_URI requires raw encoding, not {:?}",
                    encoding.keyword()
                ),
            });
        }
        let components = match encoding {
            Encoding::None => match &spec.components {
                Some(WireComponents::Inline(channels)) => {
                    decode_inline(channels, numeric_type, channel_count)?
                }
                Some(WireComponents::Strings(_)) => {
                    return Err(DatasetError::InvalidEncoding {
                        detail: "encoding \"none\" carries nested number arrays, got strings"
                            .to_string(),
                    });
                }
                None => return Err(DatasetError::MissingField { field: "components" }),
            },
            Encoding::Base64 => match &spec.components {
                Some(WireComponents::Strings(texts)) => {
                    decode_base64(texts, numeric_type, channel_count)?
                }
                Some(WireComponents::Inline(_)) => {
                    return Err(DatasetError::InvalidEncoding {
                        detail: "encoding \"base64\" carries per-channel strings, got numbers"
                            .to_string(),
                    });
                }
                None => return Err(DatasetError::MissingField { field: "components" }),
            },
            Encoding::Raw => {
                if spec.components.is_some() {
                    return Err(DatasetError::InvalidEncoding {
                        detail: "encoding \"raw\" references an external payload; inline \
                                 components are not allowed"
                            .to_string(),
                    });
                }
                let uri = spec
                    .components_uri
                    .as_deref()
                    .ok_or(DatasetError::MissingField { field: "components_URI" })?;
                let bytes = raw_payload
                    .ok_or_else(|| DatasetError::MissingPayload { uri: uri.to_string() })?;
                decode_raw(bytes, numeric_type, channel_count)?
            }
        };

        let unit = if spec.unit.is_empty() {
            CompositeUnit::dimensionless()
        } else {
            CompositeUnit::parse(&spec.unit)?
        };
        let (mut dataset, warning) = Dataset::new(
            components,
            DatasetOptions {
                name: spec.name.clone(),
                unit: Some(unit),
                quantity: spec.quantity.clone(),
                encoding,
                dataset_type: Some(dataset_type),
                component_labels: spec.component_labels.clone(),
            },
        )?;
        dataset.components_uri = spec.components_uri.clone();
        Ok((dataset, warning))
    }

    /// Emit the minimal wire specification and, for raw datasets, the
    /// payload bytes the caller must place behind the URI.
    ///
    /// Keys holding derivable defaults are dropped: the unit's own
    /// physical type as quantity name, `scalar`, `none`, all-empty
    /// component labels, and the empty unit.
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::MissingField`] when a raw dataset has no
    ///   `components_URI` assigned yet.
    /// - [`DatasetError::NonFiniteInline`] when inline encoding meets NaN
    ///   or an infinity.
    pub fn to_spec(&self) -> DatasetResult<(DatasetSpec, Option<Vec<u8>>)> {
        let (components, components_uri, payload) = match self.encoding {
            Encoding::None => {
                (Some(WireComponents::Inline(encode_inline(&self.components)?)), None, None)
            }
            Encoding::Base64 => {
                (Some(WireComponents::Strings(encode_base64(&self.components))), None, None)
            }
            Encoding::Raw => {
                let uri = self
                    .components_uri
                    .clone()
                    .ok_or(DatasetError::MissingField { field: "components_URI" })?;
                (None, Some(uri), Some(encode_raw(&self.components)))
            }
        };
        let spec = DatasetSpec {
            name: self.name.clone(),
            unit: if self.unit.factors().is_empty() {
                String::new()
            } else {
                self.unit.to_string()
            },
            quantity: (self.quantity_name != self.unit.physical_type())
                .then(|| self.quantity_name.clone()),
            encoding: (self.encoding != Encoding::None)
                .then(|| self.encoding.keyword().to_string()),
            numeric_type: Some(self.numeric_type().keyword().to_string()),
            dataset_type: (self.dataset_type != DatasetType::Scalar)
                .then(|| self.dataset_type.keyword()),
            component_labels: self
                .component_labels
                .iter()
                .any(|label| !label.is_empty())
                .then(|| self.component_labels.clone()),
            components,
            components_uri,
        };
        Ok((spec, payload))
    }

    /// Swap in a replacement buffer, keeping all metadata.
    ///
    /// The replacement must keep the channel count; its numeric type may
    /// differ (the stored type derives from the buffer).
    pub fn replace_components(&mut self, components: ComponentsArray) -> DatasetResult<()> {
        let expected = self.dataset_type.channel_count();
        let found = components.channel_count();
        if found != expected {
            return Err(DatasetError::ComponentCountMismatch { expected, found });
        }
        self.components = components;
        Ok(())
    }

    /// Choose how the payload serializes; takes effect on the next
    /// `to_spec`.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// Assign the external payload name a raw dataset serializes under.
    pub fn set_components_uri(&mut self, uri: String) {
        self.components_uri = Some(uri);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &CompositeUnit {
        &self.unit
    }

    pub fn quantity_name(&self) -> &str {
        &self.quantity_name
    }

    pub fn component_labels(&self) -> &[String] {
        &self.component_labels
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The buffer's element type; changes when a transform widens the
    /// data.
    pub fn numeric_type(&self) -> NumericType {
        self.components.numeric_type()
    }

    pub fn dataset_type(&self) -> DatasetType {
        self.dataset_type
    }

    pub fn components(&self) -> &ComponentsArray {
        &self.components
    }

    pub fn components_uri(&self) -> Option<&str> {
        self.components_uri.as_deref()
    }

    pub fn channel_count(&self) -> usize {
        self.dataset_type.channel_count()
    }

    pub fn points_per_channel(&self) -> usize {
        self.components.points_per_channel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use num_complex::Complex64;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Absorption defaults: dimensionless unit, scalar type, `none`
    //   encoding, padded labels, derived quantity name.
    // - Payload-carrier dispatch per encoding, including every mismatch
    //   and missing-field rejection.
    // - Channel-count enforcement at construction and replacement.
    // - Minimal emission and the raw sidecar byte round trip.
    // - Quantity-name warning plumbing for unknown physical types.
    //
    // They intentionally DO NOT cover:
    // - Payload byte layouts (core::codec tests).
    // - Grid-size validation against dimensions (model tests).
    // -------------------------------------------------------------------------

    fn inline_spec(text: &str) -> DatasetSpec {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify absorption defaults for a minimal inline specification.
    //
    // Given
    // -----
    // - Only numeric_type and a one-channel components array.
    //
    // Expect
    // ------
    // - Scalar, `none` encoding, dimensionless unit with the derived
    //   quantity name, one empty label, no warning.
    fn dataset_absorbs_minimal_inline_spec_with_defaults() {
        // Arrange
        let spec = inline_spec(r#"{"numeric_type": "float32", "components": [[1.5, 2.5]]}"#);

        // Act
        let (dataset, warning) = Dataset::from_spec(&spec, None).unwrap();

        // Assert
        assert!(warning.is_none());
        assert_eq!(dataset.dataset_type(), DatasetType::Scalar);
        assert_eq!(dataset.encoding(), Encoding::None);
        assert_eq!(dataset.numeric_type(), NumericType::Float32);
        assert!(dataset.unit().is_dimensionless());
        assert_eq!(dataset.quantity_name(), "dimensionless");
        assert_eq!(dataset.component_labels(), &[String::new()]);
        assert_eq!(dataset.components(), &ComponentsArray::Float32(array![[1.5f32, 2.5]]));
        assert_eq!(dataset.points_per_channel(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify the payload carrier must match the declared encoding.
    //
    // Given
    // -----
    // - Strings under `none`, numbers under `base64`, inline components
    //   under `raw`, and a URI under `none`.
    //
    // Expect
    // ------
    // - InvalidEncoding for each; MissingField for absent carriers.
    fn dataset_rejects_payload_encoding_mismatches() {
        // Arrange
        let strings_under_none =
            inline_spec(r#"{"numeric_type": "uint8", "components": ["AAE="]}"#);
        let numbers_under_base64 = inline_spec(
            r#"{"numeric_type": "uint8", "encoding": "base64", "components": [[0, 1]]}"#,
        );
        let inline_under_raw = inline_spec(
            r#"{"numeric_type": "uint8", "encoding": "raw", "components": [[0, 1]]}"#,
        );
        let uri_under_none = inline_spec(
            r#"{"numeric_type": "uint8", "components": [[0]], "components_URI": "file:x.dat"}"#,
        );
        let bare = inline_spec(r#"{"numeric_type": "uint8"}"#);

        // Act / Assert
        for spec in [&strings_under_none, &numbers_under_base64, &inline_under_raw, &uri_under_none]
        {
            assert!(
                matches!(
                    Dataset::from_spec(spec, None).unwrap_err(),
                    DatasetError::InvalidEncoding { .. }
                ),
                "expected InvalidEncoding for {spec:?}"
            );
        }
        assert_eq!(
            Dataset::from_spec(&bare, None).unwrap_err(),
            DatasetError::MissingField { field: "components" }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify raw absorption needs both the URI and the payload bytes, and
    // that the bytes round-trip through to_spec.
    //
    // Given
    // -----
    // - A raw float64 specification with a two-channel vector payload.
    //
    // Expect
    // ------
    // - MissingField without a URI; MissingPayload without bytes; with
    //   both, the buffer decodes and to_spec returns identical bytes.
    fn dataset_raw_payload_round_trips_through_sidecar_bytes() {
        // Arrange
        let no_uri = inline_spec(r#"{"numeric_type": "float64", "encoding": "raw"}"#);
        let spec = inline_spec(
            r#"{
                "name": "signal",
                "numeric_type": "float64",
                "dataset_type": "vector_2",
                "encoding": "raw",
                "components_URI": "file:./signal.dat"
            }"#,
        );
        let mut bytes = Vec::new();
        for value in [1.0f64, 2.0, 3.0, 4.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        // Act
        let (dataset, _) = Dataset::from_spec(&spec, Some(&bytes)).unwrap();
        let (emitted, payload) = dataset.to_spec().unwrap();

        // Assert
        assert_eq!(
            Dataset::from_spec(&no_uri, None).unwrap_err(),
            DatasetError::MissingField { field: "components_URI" }
        );
        assert_eq!(
            Dataset::from_spec(&spec, None).unwrap_err(),
            DatasetError::MissingPayload { uri: "file:./signal.dat".to_string() }
        );
        assert_eq!(
            dataset.components(),
            &ComponentsArray::Float64(array![[1.0, 2.0], [3.0, 4.0]])
        );
        assert_eq!(payload, Some(bytes));
        assert_eq!(emitted.components_uri.as_deref(), Some("file:./signal.dat"));
        assert!(emitted.components.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify minimal emission and the full spec round trip.
    //
    // Given
    // -----
    // - A default-heavy scalar dataset; a rich vector dataset with unit,
    //   labels, and base64 encoding.
    //
    // Expect
    // ------
    // - The scalar emits exactly numeric_type and components; the rich
    //   dataset rebuilds identically from its own emission.
    fn dataset_spec_round_trip_is_minimal_and_lossless() {
        // Arrange
        let plain = inline_spec(r#"{"numeric_type": "int16", "components": [[1, 2, 3]]}"#);
        let rich = inline_spec(
            r#"{
                "name": "field",
                "unit": "cm",
                "encoding": "base64",
                "numeric_type": "float32",
                "dataset_type": "vector_2",
                "component_labels": ["x", "y"],
                "components": ["AACAPwAAAEA=", "AABAQAAAgEA="]
            }"#,
        );

        // Act
        let (plain_dataset, _) = Dataset::from_spec(&plain, None).unwrap();
        let (plain_emitted, _) = plain_dataset.to_spec().unwrap();
        let (rich_dataset, _) = Dataset::from_spec(&rich, None).unwrap();
        let (rich_emitted, _) = rich_dataset.to_spec().unwrap();
        let (rebuilt, _) = Dataset::from_spec(&rich_emitted, None).unwrap();

        // Assert
        let object = serde_json::to_value(&plain_emitted).unwrap();
        let object = object.as_object().unwrap();
        assert_eq!(object.len(), 2, "unexpected keys in {object:?}");
        assert_eq!(rich_emitted.unit, "cm");
        assert_eq!(rich_emitted.quantity, None, "length matches cm's physical type");
        assert_eq!(rebuilt, rich_dataset);
    }

    #[test]
    // Purpose
    // -------
    // Verify channel-count enforcement at construction, label validation,
    // and buffer replacement.
    //
    // Given
    // -----
    // - A two-channel buffer declared vector_3; three labels for two
    //   channels; a replacement buffer with the wrong channel count.
    //
    // Expect
    // ------
    // - ComponentCountMismatch / LabelCountMismatch; replacement fails
    //   without mutating, then succeeds with a complex buffer and the
    //   numeric type follows.
    fn dataset_enforces_channel_counts_everywhere() {
        // Arrange
        let two_channels = ComponentsArray::Float64(array![[1.0], [2.0]]);

        // Act
        let wrong_type = Dataset::new(
            two_channels.clone(),
            DatasetOptions { dataset_type: Some(DatasetType::Vector(3)), ..Default::default() },
        )
        .unwrap_err();
        let wrong_labels = Dataset::new(
            two_channels.clone(),
            DatasetOptions {
                dataset_type: Some(DatasetType::Vector(2)),
                component_labels: Some(vec!["a".into(), "b".into(), "c".into()]),
                ..Default::default()
            },
        )
        .unwrap_err();
        let (mut dataset, _) = Dataset::new(
            two_channels.clone(),
            DatasetOptions { dataset_type: Some(DatasetType::Vector(2)), ..Default::default() },
        )
        .unwrap();
        let replace_err = dataset
            .replace_components(ComponentsArray::Float64(array![[1.0], [2.0], [3.0]]))
            .unwrap_err();

        // Assert
        assert_eq!(wrong_type, DatasetError::ComponentCountMismatch { expected: 3, found: 2 });
        assert_eq!(wrong_labels, DatasetError::LabelCountMismatch { expected: 2, found: 3 });
        assert_eq!(replace_err, DatasetError::ComponentCountMismatch { expected: 2, found: 3 });
        assert_eq!(dataset.components(), &two_channels, "failed replacement must not mutate");
        dataset
            .replace_components(ComponentsArray::Complex128(array![
                [Complex64::new(1.0, 0.0)],
                [Complex64::new(2.0, 0.0)]
            ]))
            .unwrap();
        assert_eq!(dataset.numeric_type(), NumericType::Complex128);
    }

    #[test]
    // Purpose
    // -------
    // Verify quantity names resolve at absorption: matching names are
    // silent, unverifiable ones warn and are kept and re-emitted.
    //
    // Given
    // -----
    // - Unit "cm" with quantity "Length"; unit "m^-1 s^-1" (no named
    //   physical type) with quantity "cross section rate".
    //
    // Expect
    // ------
    // - The first normalizes silently and is dropped from emission; the
    //   second warns, keeps the supplied name, and emits it.
    fn dataset_resolves_quantity_names_at_absorption() {
        // Arrange
        let known = inline_spec(
            r#"{"unit": "cm", "quantity": "Length", "numeric_type": "float64",
                "components": [[1.0]]}"#,
        );
        let unknown = inline_spec(
            r#"{"unit": "m^-1 s^-1", "quantity": "cross section rate",
                "numeric_type": "float64", "components": [[1.0]]}"#,
        );

        // Act
        let (known_dataset, known_warning) = Dataset::from_spec(&known, None).unwrap();
        let (unknown_dataset, unknown_warning) = Dataset::from_spec(&unknown, None).unwrap();
        let (unknown_emitted, _) = unknown_dataset.to_spec().unwrap();

        // Assert
        assert!(known_warning.is_none());
        assert_eq!(known_dataset.quantity_name(), "length");
        assert!(unknown_warning.is_some());
        assert_eq!(unknown_dataset.quantity_name(), "cross section rate");
        assert_eq!(unknown_emitted.quantity.as_deref(), Some("cross section rate"));
    }
}
