//! Non-quantitative dimensions: ordered string labels.
//!
//! Purpose
//! -------
//! Implement the labeled dimension variant. Coordinates are the label
//! strings themselves, so the quantitative surface (units, offsets,
//! reciprocal axes) does not exist here; the dispatch layer reports those
//! operations as unsupported.

use crate::dimension::errors::{DimensionError, DimensionResult, TruncationWarning};

/// Caller-supplied options for [`LabeledDimension::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledOptions {
    pub label: String,
    pub reverse: bool,
}

/// A dimension whose coordinates are category labels, not quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDimension {
    label: String,
    values: Vec<String>,
    reverse: bool,
}

impl LabeledDimension {
    /// Build a labeled dimension from its category strings.
    ///
    /// Errors
    /// ------
    /// - [`DimensionError::EmptyValues`] when `values` is empty.
    pub fn new(values: Vec<String>, options: LabeledOptions) -> DimensionResult<LabeledDimension> {
        if values.is_empty() {
            return Err(DimensionError::EmptyValues);
        }
        Ok(LabeledDimension { label: options.label, values, reverse: options.reverse })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Category strings in declared order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Category strings in display order.
    pub fn coordinates(&self) -> Vec<&str> {
        let ordered = self.values.iter().map(String::as_str);
        if self.reverse { ordered.rev().collect() } else { ordered.collect() }
    }

    pub fn axis_label(&self) -> String {
        self.label.clone()
    }

    /// Shrink to the first `count` declared labels.
    ///
    /// Same contract as the arbitrary grid: growth fails with
    /// [`DimensionError::CountIncrease`], a shrink returns a
    /// [`TruncationWarning`].
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
        self.values.truncate(count);
        Ok(Some(TruncationWarning { from: current, to: count }))
    }
}
