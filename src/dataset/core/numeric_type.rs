//! The thirteen sample types a dataset can carry.

use crate::dataset::errors::{DatasetError, DatasetResult};

/// Closed set of wire sample types, each with a fixed little-endian width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float16,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl NumericType {
    /// Wire keyword, also the canonical display form.
    pub fn keyword(&self) -> &'static str {
        match self {
            NumericType::UInt8 => "uint8",
            NumericType::UInt16 => "uint16",
            NumericType::UInt32 => "uint32",
            NumericType::UInt64 => "uint64",
            NumericType::Int8 => "int8",
            NumericType::Int16 => "int16",
            NumericType::Int32 => "int32",
            NumericType::Int64 => "int64",
            NumericType::Float16 => "float16",
            NumericType::Float32 => "float32",
            NumericType::Float64 => "float64",
            NumericType::Complex64 => "complex64",
            NumericType::Complex128 => "complex128",
        }
    }

    /// Parse a wire keyword.
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::InvalidNumericType`] on anything outside the
    ///   thirteen keywords.
    pub fn parse(keyword: &str) -> DatasetResult<NumericType> {
        match keyword {
            "uint8" => Ok(NumericType::UInt8),
            "uint16" => Ok(NumericType::UInt16),
            "uint32" => Ok(NumericType::UInt32),
            "uint64" => Ok(NumericType::UInt64),
            "int8" => Ok(NumericType::Int8),
            "int16" => Ok(NumericType::Int16),
            "int32" => Ok(NumericType::Int32),
            "int64" => Ok(NumericType::Int64),
            "float16" => Ok(NumericType::Float16),
            "float32" => Ok(NumericType::Float32),
            "float64" => Ok(NumericType::Float64),
            "complex64" => Ok(NumericType::Complex64),
            "complex128" => Ok(NumericType::Complex128),
            other => Err(DatasetError::InvalidNumericType { keyword: other.to_string() }),
        }
    }

    /// Bytes per sample on the wire (a complex sample counts both parts).
    pub fn width(&self) -> usize {
        match self {
            NumericType::UInt8 | NumericType::Int8 => 1,
            NumericType::UInt16 | NumericType::Int16 | NumericType::Float16 => 2,
            NumericType::UInt32 | NumericType::Int32 | NumericType::Float32 => 4,
            NumericType::UInt64
            | NumericType::Int64
            | NumericType::Float64
            | NumericType::Complex64 => 8,
            NumericType::Complex128 => 16,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, NumericType::Complex64 | NumericType::Complex128)
    }
}

impl std::fmt::Display for NumericType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Keyword round trips across all thirteen types and the widths the
    //   byte codec relies on.
    // -------------------------------------------------------------------------

    const ALL: [NumericType; 13] = [
        NumericType::UInt8,
        NumericType::UInt16,
        NumericType::UInt32,
        NumericType::UInt64,
        NumericType::Int8,
        NumericType::Int16,
        NumericType::Int32,
        NumericType::Int64,
        NumericType::Float16,
        NumericType::Float32,
        NumericType::Float64,
        NumericType::Complex64,
        NumericType::Complex128,
    ];

    #[test]
    // Purpose
    // -------
    // Verify every keyword parses back to its type and unknown keywords
    // fail.
    //
    // Given
    // -----
    // - All thirteen types; the keyword "float128".
    //
    // Expect
    // ------
    // - parse(keyword()) is the identity; "float128" errors.
    fn numeric_type_keywords_round_trip() {
        // Act / Assert
        for numeric_type in ALL {
            assert_eq!(NumericType::parse(numeric_type.keyword()).unwrap(), numeric_type);
        }
        assert_eq!(
            NumericType::parse("float128").unwrap_err(),
            DatasetError::InvalidNumericType { keyword: "float128".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the declared widths match the wire layout.
    //
    // Given
    // -----
    // - All thirteen types.
    //
    // Expect
    // ------
    // - Widths [1,2,4,8,1,2,4,8,2,4,8,8,16] in declaration order.
    fn numeric_type_widths_match_wire_layout() {
        // Arrange
        let expected = [1, 2, 4, 8, 1, 2, 4, 8, 2, 4, 8, 8, 16];

        // Act / Assert
        for (numeric_type, width) in ALL.iter().zip(expected) {
            assert_eq!(numeric_type.width(), width, "width of {numeric_type}");
        }
        assert!(NumericType::Complex64.is_complex());
        assert!(!NumericType::Float64.is_complex());
    }
}
