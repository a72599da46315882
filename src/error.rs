//! Error types shared by every module of the crate.
//!
//! All matrix and code-construction errors are contract violations: they mean
//! the caller's `n`/`k` bookkeeping is inconsistent. They abort the operation
//! and are never worth retrying.

use thiserror::Error;

/// Result type for all fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A bit access addressed a row or column outside the matrix.
    #[error("bit ({row}, {col}) is outside a {rows}x{cols} matrix")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Mismatched or oversized matrix dimensions.
    #[error("dimension error: {0}")]
    Dimension(String),

    /// A generator matrix with no rows, or narrower than it is tall.
    #[error("invalid generator shape {rows}x{cols}: need 1 <= rows <= cols")]
    InvalidGeneratorShape { rows: usize, cols: usize },

    /// Malformed user input or out-of-range parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An image could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn dimension(msg: impl Into<String>) -> Self {
        Error::Dimension(msg.into())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::invalid_input("k = 0");
        assert_eq!(err.to_string(), "invalid input: k = 0");

        let err = Error::Index {
            row: 3,
            col: 1,
            rows: 2,
            cols: 4,
        };
        assert_eq!(err.to_string(), "bit (3, 1) is outside a 2x4 matrix");
    }

    #[test]
    fn test_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "missing");

        let img = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "truncated",
        ));
        let err: Error = img.into();
        assert!(matches!(err, Error::Image(_)));
        assert!(err.to_string().starts_with("image error"));
    }
}
