#![forbid(unsafe_code)]

//! Unified error type for the Spotlight facade.
//!
//! Each crate owns a typed error; this enum wraps them so host code can use
//! a single `?`-friendly [`Result`].

use spotlight_layout::LayoutError;
use spotlight_overlay::OverlayError;
use spotlight_sequence::SequenceError;

use crate::config::ConfigError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Anchor registration or layout tree failure.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Malformed overlay style or geometry.
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    /// Sequence registration or navigation failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for Spotlight APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Layout(_) => "layout",
            Self::Overlay(_) => "overlay",
            Self::Sequence(_) => "sequence",
            Self::Config(_) => "config",
        }
    }

    /// Whether the showcase is still usable after this error.
    ///
    /// Navigation and measurement errors leave state untouched; a broken
    /// configuration does not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_and_labels() {
        let err: Error = SequenceError::EmptySequence.into();
        assert_eq!(err.error_type(), "sequence");
        assert_eq!(err.to_string(), "no steps registered");
        assert!(err.is_recoverable());

        let err: Error = LayoutError::InvalidIndex { index: 4, count: 2 }.into();
        assert_eq!(err.error_type(), "layout");

        let err: Error = OverlayError::InvalidMargin(-1.0).into();
        assert_eq!(err.error_type(), "overlay");

        let err: Error = ConfigError::Validation(vec!["viewport".into()]).into();
        assert_eq!(err.error_type(), "config");
        assert!(!err.is_recoverable());
    }
}
