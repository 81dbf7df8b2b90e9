//! Error types for NDCSV encoding and decoding.
//!
//! ## Error Categories
//!
//! - **Format Errors**: the text does not match any NDCSV layout
//! - **Ambiguity Errors**: an auxiliary coordinate takes several values for
//!   the same key once a composite axis is unstacked
//! - **Label Errors**: an index or column label cannot be written back
//!   (empty string or NaN)
//! - **Shape Errors**: multi-dimensional coordinates, mismatched lengths
//! - **I/O Errors**: file or stream reading/writing failures
//!
//! ## Examples
//!
//! ```rust
//! use ndcsv::{from_str, Error};
//!
//! let err = from_str("foo,bar,baz").unwrap_err();
//! assert!(matches!(err, Error::Format { .. }));
//! assert!(err.to_string().contains("Malformed N-dimensional CSV"));
//! ```

use std::fmt;
use thiserror::Error;

/// What is wrong with a label that prevents it from being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDefect {
    /// The label is the empty string
    Empty,
    /// The label is missing (NaN)
    Missing,
}

impl fmt::Display for LabelDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelDefect::Empty => write!(f, "Empty string"),
            LabelDefect::Missing => write!(f, "NaN"),
        }
    }
}

/// Represents all possible errors that can occur while encoding or decoding NDCSV.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The csv layer rejected the input
    #[error("CSV error: {0}")]
    Csv(String),

    /// The text does not match any recognized NDCSV layout
    #[error("Malformed N-dimensional CSV{detail}")]
    Format { detail: String },

    /// An auxiliary coordinate has several values for one value of its dimension
    #[error("Auxiliary coordinate {coord} has different values for the same value of its dimension {dim}")]
    Ambiguous { coord: String, dim: String },

    /// Unstacking was requested on a composite index with repeated keys
    #[error("Cannot unstack dimension {dim}: the composite index has duplicate entries")]
    DuplicateIndex { dim: String },

    /// A coordinate spans more than one dimension
    #[error("Multi-dimensional coord '{coord}' is not supported by the NDCSV format")]
    UnsupportedShape { coord: String },

    /// An index or column label is an empty string or NaN
    #[error("{0} in index")]
    InvalidLabel(LabelDefect),

    /// Input of the wrong shape or kind
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Misuse of the labeled-array API
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error with the bare "Malformed N-dimensional CSV" message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndcsv::Error;
    ///
    /// assert_eq!(Error::malformed().to_string(), "Malformed N-dimensional CSV");
    /// ```
    pub fn malformed() -> Self {
        Error::Format {
            detail: String::new(),
        }
    }

    /// Creates a format error carrying extra detail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndcsv::Error;
    ///
    /// let err = Error::malformed_with("row 4 has 5 cells, expected 3");
    /// assert!(err.to_string().starts_with("Malformed N-dimensional CSV: row 4"));
    /// ```
    pub fn malformed_with(detail: &str) -> Self {
        Error::Format {
            detail: format!(": {}", detail),
        }
    }

    /// Creates an ambiguity error for auxiliary coordinate `coord` of dimension `dim`.
    pub fn ambiguous(coord: &str, dim: &str) -> Self {
        Error::Ambiguous {
            coord: coord.to_string(),
            dim: dim.to_string(),
        }
    }

    /// Creates a duplicate-key error for `dim`.
    pub fn duplicate_index(dim: &str) -> Self {
        Error::DuplicateIndex {
            dim: dim.to_string(),
        }
    }

    /// Creates an unsupported-shape error for coordinate `coord`.
    pub fn unsupported_shape(coord: &str) -> Self {
        Error::UnsupportedShape {
            coord: coord.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndcsv::Error;
    ///
    /// let err = Error::type_mismatch("3 values", "2 values");
    /// assert!(err.to_string().contains("expected 3 values"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Error::Io(err.to_string())
        } else {
            Error::Csv(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_messages() {
        assert_eq!(
            Error::InvalidLabel(LabelDefect::Empty).to_string(),
            "Empty string in index"
        );
        assert_eq!(
            Error::InvalidLabel(LabelDefect::Missing).to_string(),
            "NaN in index"
        );
    }

    #[test]
    fn test_ambiguous_message() {
        let err = Error::ambiguous("z (x)", "x");
        assert_eq!(
            err.to_string(),
            "Auxiliary coordinate z (x) has different values for the same value of its dimension x"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(Error::from(io), Error::Io(msg) if msg.contains("gone")));
    }
}
