#![forbid(unsafe_code)]

//! Spotlight public facade.
//!
//! Highlight targets buried under any number of padded, inset, or scrolled
//! containers, one step at a time. This crate re-exports the building
//! blocks and provides the [`Showcase`] orchestrator that wires them
//! together.
//!
//! ```
//! use spotlight::prelude::*;
//!
//! let mut tree = LayoutTree::default();
//! let content = tree.push(tree.root(), Contribution::padded(Sides::all(16.0)))?;
//! let mut showcase = Showcase::with_tree(ShowcaseConfig::default(), tree)?;
//! showcase.register_step(
//!     0,
//!     showcase.step_config().shape(HighlightShape::rectangular(8.0)),
//!     Box::new(|handle| DialogContent::new("Hello").action(handle.action("Got it!", Command::Dismiss))),
//! )?;
//!
//! showcase.begin_layout_pass();
//! showcase.measure(0, Rect::new(0.0, 0.0, 100.0, 40.0), content)?;
//! showcase.layout_settled()?;
//!
//! let frame = showcase.frame().expect("overlay shown");
//! assert_eq!(frame.overlay.hole.bounds(), Rect::new(16.0, 16.0, 100.0, 40.0));
//! # Ok::<(), spotlight::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod showcase;

pub use config::{ConfigError, DEFAULT_VIEWPORT, ShowcaseConfig};
pub use error::{Error, Result};
pub use showcase::{Showcase, ShowcaseFrame, TapTarget};

pub use spotlight_core::animation::{
    AnimationDuration, BackdropFade, BackgroundAlpha, Easing, FadePhase,
};
pub use spotlight_core::geometry::{Offset, Point, Rect, Sides, Size};
#[cfg(feature = "tracing-json")]
pub use spotlight_core::logging::init_json;
pub use spotlight_layout::{
    AnchorGeometry, AnchorRegistry, Contribution, LayoutError, LayoutTree, NodeId, OffsetChain,
};
pub use spotlight_overlay::{
    Alignment, DialogPlacement, HighlightShape, Outline, Overlay, OverlayError, OverlayFrame,
    OverlayRenderer, OverlayStyle, Position, RenderTarget, Side, compose, place_dialog,
};
pub use spotlight_sequence::{
    Command, ContentRenderer, DialogAction, DialogContent, SequenceController, SequenceError,
    SequenceEvent, SequenceState, ShowcaseHandle, StepConfig, Transition, TransitionReason,
};

/// Everyday imports.
pub mod prelude {
    pub use crate::{
        Alignment, AnimationDuration, BackgroundAlpha, Command, Contribution, DialogContent,
        HighlightShape, LayoutTree, NodeId, OffsetChain, Point, Position, Rect, SequenceState,
        Showcase, ShowcaseConfig, ShowcaseHandle, Sides, Size, StepConfig,
    };
}
