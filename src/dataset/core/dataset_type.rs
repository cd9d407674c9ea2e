//! Dataset component layouts and their channel counts.
//!
//! Purpose
//! -------
//! Implement the six component layouts a dataset can declare. The layout
//! fixes the channel count the payload must satisfy: a `vector_3` dataset
//! carries exactly three components per grid point.
//!
//! Conventions
//! -----------
//! - Wire keywords are `scalar`, `vector_n`, `matrix_n_m`,
//!   `symmetric_matrix_n`, `RGB`, `RGBA`; sizes are base-10 and at least
//!   one. Anything else fails with `InvalidDatasetType`.

use crate::dataset::errors::{DatasetError, DatasetResult};

/// Closed set of component layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetType {
    Scalar,
    Vector(usize),
    Matrix(usize, usize),
    /// Upper triangle of an `n × n` symmetric matrix, row by row.
    SymmetricMatrix(usize),
    Rgb,
    Rgba,
}

/// Base-10 size token: digits only, at least one.
fn parse_size(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let size: usize = text.parse().ok()?;
    (size >= 1).then_some(size)
}

impl DatasetType {
    /// Parse a wire keyword.
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::InvalidDatasetType`] on unknown layouts, missing
    ///   or malformed sizes, and zero sizes.
    pub fn parse(keyword: &str) -> DatasetResult<DatasetType> {
        let invalid = || DatasetError::InvalidDatasetType { keyword: keyword.to_string() };
        match keyword {
            "scalar" => Ok(DatasetType::Scalar),
            "RGB" => Ok(DatasetType::Rgb),
            "RGBA" => Ok(DatasetType::Rgba),
            _ => {
                // symmetric_matrix_ first: matrix_ is its suffix's prefix.
                if let Some(size) = keyword.strip_prefix("symmetric_matrix_") {
                    Ok(DatasetType::SymmetricMatrix(parse_size(size).ok_or_else(invalid)?))
                } else if let Some(sizes) = keyword.strip_prefix("matrix_") {
                    let (rows, columns) = sizes.split_once('_').ok_or_else(invalid)?;
                    Ok(DatasetType::Matrix(
                        parse_size(rows).ok_or_else(invalid)?,
                        parse_size(columns).ok_or_else(invalid)?,
                    ))
                } else if let Some(size) = keyword.strip_prefix("vector_") {
                    Ok(DatasetType::Vector(parse_size(size).ok_or_else(invalid)?))
                } else {
                    Err(invalid())
                }
            }
        }
    }

    /// Wire keyword, also the canonical display form.
    pub fn keyword(&self) -> String {
        match self {
            DatasetType::Scalar => "scalar".to_string(),
            DatasetType::Vector(size) => format!("vector_{size}"),
            DatasetType::Matrix(rows, columns) => format!("matrix_{rows}_{columns}"),
            DatasetType::SymmetricMatrix(size) => format!("symmetric_matrix_{size}"),
            DatasetType::Rgb => "RGB".to_string(),
            DatasetType::Rgba => "RGBA".to_string(),
        }
    }

    /// Components per grid point this layout requires.
    pub fn channel_count(&self) -> usize {
        match self {
            DatasetType::Scalar => 1,
            DatasetType::Vector(size) => *size,
            DatasetType::Matrix(rows, columns) => rows * columns,
            DatasetType::SymmetricMatrix(size) => size * (size + 1) / 2,
            DatasetType::Rgb => 3,
            DatasetType::Rgba => 4,
        }
    }
}

impl std::fmt::Display for DatasetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.keyword())
    }
}
