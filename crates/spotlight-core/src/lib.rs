#![forbid(unsafe_code)]

//! Core: geometry, backdrop fades, and logging glue.
//!
//! # Role in Spotlight
//! `spotlight-core` holds the value types every other crate speaks:
//! logical-pixel [`geometry`], the deterministic backdrop [`animation`], and
//! the optional [`logging`] re-exports. It has no notion of steps, anchors, or
//! overlays.
//!
//! # How it fits in the system
//! `spotlight-layout` resolves anchor bounds into [`geometry::Rect`]s,
//! `spotlight-overlay` turns them into holes and dialog placements, and
//! `spotlight-sequence` decides which step is on screen.

pub mod animation;
pub mod geometry;
pub mod logging;

pub use animation::{AnimationDuration, BackdropFade, BackgroundAlpha, Easing, FadePhase};
pub use geometry::{Offset, Point, Rect, Sides, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
