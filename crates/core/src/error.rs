//! Error types for page filling.

use thiserror::Error;

/// Errors raised by the page-filling engine.
///
/// Only configuration problems and broken item implementations are errors.
/// An item that does not fit on the current page is reported as leftover and
/// a cancelled page is reported through [`PageResult::cancelled`](crate::PageResult).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Page dimensions are not positive or leave no printable area.
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// Horizontal or vertical spacing is negative.
    #[error("invalid spacing: {0}")]
    InvalidSpacing(String),

    /// Margins are negative or consume the whole page.
    #[error("invalid margins: {0}")]
    InvalidMargins(String),

    /// An item can never be placed, even on an empty page.
    #[error("invalid item: {0}")]
    InvalidItem(String),
}

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidPage("width must be positive".into());
        assert_eq!(err.to_string(), "invalid page: width must be positive");

        let err = Error::InvalidSpacing("-2".into());
        assert_eq!(err.to_string(), "invalid spacing: -2");
    }

    #[test]
    fn test_every_variant_is_a_caller_error() {
        let errors = [
            Error::InvalidPage("p".into()),
            Error::InvalidSpacing("s".into()),
            Error::InvalidMargins("m".into()),
            Error::InvalidItem("i".into()),
        ];
        for err in &errors {
            let detail = match err {
                Error::InvalidPage(d)
                | Error::InvalidSpacing(d)
                | Error::InvalidMargins(d)
                | Error::InvalidItem(d) => d,
            };
            assert!(err.to_string().starts_with("invalid "));
            assert!(err.to_string().ends_with(detail.as_str()));
        }
    }
}
