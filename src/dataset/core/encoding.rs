//! The three payload encodings.

use crate::dataset::errors::{DatasetError, DatasetResult};

/// How a dataset's components travel in the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Plain nested JSON number arrays.
    #[default]
    None,
    /// One standard-alphabet base64 string per channel.
    Base64,
    /// A single external little-endian blob named by `components_URI`.
    Raw,
}

impl Encoding {
    pub fn keyword(&self) -> &'static str {
        match self {
            Encoding::None => "none",
            Encoding::Base64 => "base64",
            Encoding::Raw => "raw",
        }
    }

    /// Parse a wire keyword.
    ///
    /// Errors
    /// ------
    /// - [`DatasetError::InvalidEncoding`] on anything but `none`,
    ///   `base64`, or `raw`.
    pub fn parse(keyword: &str) -> DatasetResult<Encoding> {
        match keyword {
            "none" => Ok(Encoding::None),
            "base64" => Ok(Encoding::Base64),
            "raw" => Ok(Encoding::Raw),
            other => Err(DatasetError::InvalidEncoding {
                detail: format!("unknown encoding keyword {other:?}"),
            }),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify keyword round trips and the unknown-keyword rejection.
    //
    // Given
    // -----
    // - The three encodings and the keyword "base-64".
    //
    // Expect
    // ------
    // - parse(keyword()) is the identity; "base-64" errors.
    fn encoding_keywords_round_trip() {
        // Act / Assert
        for encoding in [Encoding::None, Encoding::Base64, Encoding::Raw] {
            assert_eq!(Encoding::parse(encoding.keyword()).unwrap(), encoding);
        }
        assert!(matches!(
            Encoding::parse("base-64").unwrap_err(),
            DatasetError::InvalidEncoding { .. }
        ));
    }
}
