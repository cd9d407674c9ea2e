//! dataset::spec — serde wire objects for dataset specifications.
//!
//! Purpose
//! -------
//! Define the JSON shape of a dataset entry: descriptive keys plus one of
//! three payload carriers (nested numbers for `none`, per-channel strings
//! for `base64`, a `components_URI` reference for `raw`). Keyword parsing
//! and payload decoding happen in [`crate::dataset::Dataset::from_spec`];
//! this module only carries the data.
//!
//! Conventions
//! -----------
//! - `unit` holds a pure unit expression (`"cm"`, `"s^-2"`); an absent or
//!   empty string means dimensionless. Parsing happens at absorption, not
//!   deserialization, because the empty default needs interpretation.
//! - Every key is optional on the wire. Serialization skips keys holding
//!   their default value, so emitted JSON stays minimal.
//! - Unknown keys are rejected (`deny_unknown_fields`) so typos fail
//!   loudly instead of silently deserializing to defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `components` key: per-channel base64 strings or nested inline
/// number arrays, distinguished by element shape.
///
/// An empty array deserializes as `Strings` (the first probed variant);
/// downstream channel-count validation rejects it either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireComponents {
    Strings(Vec<String>),
    Inline(Vec<Vec<Value>>),
}

/// One dataset entry of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<WireComponents>,
    #[serde(default, rename = "components_URI", skip_serializing_if = "Option::is_none")]
    pub components_uri: Option<String>,
}
