#![forbid(unsafe_code)]

//! Showcase configuration.
//!
//! [`ShowcaseConfig`] is a plain builder-style struct. With the `config`
//! feature it can also be loaded from TOML or JSON:
//!
//! ```toml
//! auto_start = true
//! advance_on_hole_tap = false
//!
//! [viewport]
//! width = 360.0
//! height = 640.0
//!
//! [defaults]
//! alignment = "center-horizontal"
//! background_alpha = "normal"
//! dialog_margin = 16.0
//!
//! [defaults.shape]
//! kind = "rectangular"
//! corner_radius = 8.0
//! padding = 0.0
//! ```
//!
//! Missing keys fall back to [`ShowcaseConfig::default`].

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

use spotlight_core::geometry::Size;
use spotlight_overlay::OverlayStyle;
use spotlight_sequence::StepConfig;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default drawable area.
pub const DEFAULT_VIEWPORT: Size = Size::new(360.0, 640.0);

/// Errors from loading or validating a [`ShowcaseConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Parameters out of range.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(problems) => write!(f, "validation failed: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

/// Host-level showcase settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ShowcaseConfig {
    /// Start the sequence on the first settled layout pass.
    pub auto_start: bool,
    /// A tap inside the highlighted hole advances to the next step.
    pub advance_on_hole_tap: bool,
    /// A tap on the dimmed backdrop dismisses the sequence.
    pub dismiss_on_backdrop_tap: bool,
    /// Drawable area the overlay must stay inside.
    pub viewport: Size,
    /// Style new steps start from (see [`ShowcaseConfig::step`]).
    pub defaults: OverlayStyle,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            advance_on_hole_tap: false,
            dismiss_on_backdrop_tap: false,
            viewport: DEFAULT_VIEWPORT,
            defaults: OverlayStyle::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    #[must_use]
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: OverlayStyle) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn advance_on_hole_tap(mut self, enabled: bool) -> Self {
        self.advance_on_hole_tap = enabled;
        self
    }

    #[must_use]
    pub fn dismiss_on_backdrop_tap(mut self, enabled: bool) -> Self {
        self.dismiss_on_backdrop_tap = enabled;
        self
    }

    /// A step config seeded with [`defaults`](Self::defaults).
    pub fn step(&self) -> StepConfig {
        StepConfig {
            label: None,
            style: self.defaults,
        }
    }

    /// Check every parameter, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let Size { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            problems.push(format!(
                "viewport must be positive and finite, got {width}x{height}"
            ));
        }
        if let Err(err) = self.defaults.validate() {
            problems.push(format!("defaults: {err}"));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Parse from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}
