#![forbid(unsafe_code)]

//! Overlay geometry for Spotlight.
//!
//! - [`shape`]: [`HighlightShape`] descriptors and the [`Outline`] they
//!   resolve to for a given anchor.
//! - [`placement`]: dialog placement with flip and viewport clamping.
//! - [`renderer`]: the [`OverlayRenderer`] that owns the single visible
//!   overlay and its backdrop fade.

pub mod placement;
pub mod renderer;
pub mod shape;

pub use placement::{Alignment, DialogPlacement, PlacementRequest, Position, Side, place_dialog};
pub use renderer::{
    DEFAULT_DIALOG_MARGIN, Overlay, OverlayFrame, OverlayRenderer, OverlayStyle, RenderTarget,
    compose,
};
pub use shape::{HighlightShape, Outline};

use spotlight_core::geometry::{Rect, Size};

/// Overlay configuration and rendering errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    /// A shape parameter is negative or not finite.
    #[error("invalid highlight shape: {name} = {value}")]
    InvalidShape { name: &'static str, value: f32 },

    /// Backdrop opacity outside `[0, 1]`.
    #[error("background alpha {0} is outside [0, 1]")]
    InvalidAlpha(f32),

    /// Negative or non-finite dialog margin.
    #[error("invalid dialog margin {0}")]
    InvalidMargin(f32),

    /// Anchor bounds contain NaN/infinite values or a negative size.
    #[error("invalid anchor bounds {0:?}")]
    InvalidAnchor(Rect),

    /// Dialog size is negative or not finite.
    #[error("invalid dialog size {0:?}")]
    InvalidDialogSize(Size),
}
