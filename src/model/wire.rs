//! model::wire — the JSON envelope around [`DataModel`].
//!
//! Purpose
//! -------
//! Absorb and emit the serialization format: a root object holding a
//! single `"CSDM"` key whose value carries `version`,
//! `controlled_variables` (dimensions) and `uncontrolled_variables`
//! (datasets).
//!
//! Key behaviors
//! -------------
//! - Reading gates on the declared version (0.0.9 through 0.0.12),
//!   rejects unknown keys at the root and envelope levels, and absorbs
//!   dimensions before datasets so grid validation sees the full axis
//!   list.
//! - Writing always declares [`LATEST_VERSION`] regardless of what was
//!   read, and emits the minimal form: empty variable lists and
//!   defaulted keys are omitted.
//! - Raw-encoded payloads travel beside the document as an in-memory
//!   name-to-bytes map; this module never touches the filesystem.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every raw dataset must carry a payload name before emission;
//!   `assign_sidecar_names` derives the conventional ones.
//! - Payload names are treated as opaque map keys. Distinctness is the
//!   caller's concern when naming datasets identically.
//!
//! Downstream usage
//! ----------------
//! - The Python surface exposes these methods as the load/save entry
//!   points.
//!
//! Testing notes
//! -------------
//! - Round trips assert on re-parsed JSON values, not on text, except
//!   for the minimal-envelope form which is pinned byte for byte.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::core::codec::sidecar_name;
use crate::dataset::core::encoding::Encoding;
use crate::dataset::spec::DatasetSpec;
use crate::dimension::kind::Dimension;
use crate::dimension::spec::DimensionSpec;
use crate::model::datamodel::{DataModel, LATEST_VERSION, SUPPORTED_VERSIONS};
use crate::model::errors::{ModelError, ModelResult};
use crate::units::errors::QuantityNameWarning;

/// The root document: exactly one `"CSDM"` key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CsdmDocument {
    #[serde(rename = "CSDM")]
    csdm: CsdmEnvelope,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CsdmEnvelope {
    version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    controlled_variables: Vec<DimensionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    uncontrolled_variables: Vec<DatasetSpec>,
}

impl DataModel {
    /// Absorb a model from serialized JSON text.
    ///
    /// Parameters
    /// ----------
    /// - `text`: the document, shaped `{"CSDM": {...}}`.
    /// - `sidecars`: payload bytes for raw-encoded datasets, keyed by
    ///   their `components_URI` values.
    ///
    /// Returns
    /// -------
    /// - The model plus every quantity-name warning produced while
    ///   absorbing dimensions and datasets, in document order.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::Json`] for malformed documents or unknown keys.
    /// - [`ModelError::UnsupportedVersion`] outside 0.0.9 through 0.0.12.
    /// - Absorption errors from the dimension and dataset layers.
    pub fn from_json_str(
        text: &str,
        sidecars: &HashMap<String, Vec<u8>>,
    ) -> ModelResult<(DataModel, Vec<QuantityNameWarning>)> {
        let document: CsdmDocument = serde_json::from_str(text)?;
        DataModel::absorb(document, sidecars)
    }

    /// Absorb a model from an already-parsed JSON value.
    pub fn from_json_value(
        document: serde_json::Value,
        sidecars: &HashMap<String, Vec<u8>>,
    ) -> ModelResult<(DataModel, Vec<QuantityNameWarning>)> {
        let document: CsdmDocument = serde_json::from_value(document)?;
        DataModel::absorb(document, sidecars)
    }

    fn absorb(
        document: CsdmDocument,
        sidecars: &HashMap<String, Vec<u8>>,
    ) -> ModelResult<(DataModel, Vec<QuantityNameWarning>)> {
        let envelope = document.csdm;
        if !SUPPORTED_VERSIONS.contains(&envelope.version.as_str()) {
            return Err(ModelError::UnsupportedVersion { version: envelope.version });
        }
        let mut model = DataModel::with_version(envelope.version);
        let mut warnings = Vec::new();
        for spec in &envelope.controlled_variables {
            warnings.extend(model.add_dimension(spec)?);
        }
        for spec in &envelope.uncontrolled_variables {
            let payload = spec
                .components_uri
                .as_deref()
                .and_then(|uri| sidecars.get(uri))
                .map(Vec::as_slice);
            warnings.extend(model.add_dataset(spec, payload)?);
        }
        Ok((model, warnings))
    }

    /// Emit the model as a JSON value plus the payload map for its
    /// raw-encoded datasets.
    ///
    /// The declared version is always [`LATEST_VERSION`].
    ///
    /// Errors
    /// ------
    /// - A raw dataset without a payload name fails; call
    ///   [`DataModel::assign_sidecar_names`] first or name the payloads
    ///   directly.
    /// - Inline emission of non-finite floats fails; such values only
    ///   travel base64 or raw.
    pub fn to_json_value(&self) -> ModelResult<(serde_json::Value, HashMap<String, Vec<u8>>)> {
        let mut sidecars = HashMap::new();
        let mut uncontrolled = Vec::with_capacity(self.datasets().len());
        for dataset in self.datasets() {
            let (spec, payload) = dataset.to_spec()?;
            if let (Some(bytes), Some(uri)) = (payload, spec.components_uri.as_ref()) {
                sidecars.insert(uri.clone(), bytes);
            }
            uncontrolled.push(spec);
        }
        let document = CsdmDocument {
            csdm: CsdmEnvelope {
                version: LATEST_VERSION.to_string(),
                controlled_variables: self.dimensions().iter().map(Dimension::to_spec).collect(),
                uncontrolled_variables: uncontrolled,
            },
        };
        Ok((serde_json::to_value(document)?, sidecars))
    }

    /// Emit the model as JSON text plus the payload map.
    pub fn to_json_string(&self) -> ModelResult<(String, HashMap<String, Vec<u8>>)> {
        let (value, sidecars) = self.to_json_value()?;
        Ok((serde_json::to_string(&value)?, sidecars))
    }

    /// Derive conventional payload names for every raw-encoded dataset,
    /// overwriting any previously assigned ones.
    ///
    /// Key behaviors
    /// -------------
    /// - Named datasets serialize under `<base>_<name>.dat`, unnamed ones
    ///   under `<base>_<index>.dat`; `shared_directory` switches the
    ///   separator to `/` for directory-per-acquisition layouts.
    pub fn assign_sidecar_names(&mut self, base: &str, shared_directory: bool) {
        for index in 0..self.datasets().len() {
            let dataset = self
                .dataset_mut(index)
                .unwrap_or_else(|| unreachable!("index bounded by the dataset count"));
            if dataset.encoding() != Encoding::Raw {
                continue;
            }
            let uri = sidecar_name(base, Some(dataset.name()), index, shared_directory);
            dataset.set_components_uri(uri);
        }
    }
}
