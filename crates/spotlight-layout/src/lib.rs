#![forbid(unsafe_code)]

//! Anchor geometry in one global coordinate space.
//!
//! Targets are measured inside their immediate parent, but highlights are
//! drawn on an overlay that covers the whole window. Between the two sit any
//! number of containers, each shifting its content by padding, insets,
//! scroll, or its own position. This crate sums all of them:
//!
//! - [`chain`]: [`Contribution`]s and the [`OffsetChain`] that collapses them.
//! - [`tree`]: a [`LayoutTree`] arena that produces chains by walking parents.
//! - [`registry`]: the [`AnchorRegistry`] that stores per-step bounds and
//!   refuses to serve geometry from an older layout pass.

pub mod chain;
pub mod registry;
pub mod tree;

pub use chain::{Contribution, OffsetChain};
pub use registry::{AnchorGeometry, AnchorRegistry};
pub use spotlight_core::geometry::{Offset, Point, Rect, Sides, Size};
pub use tree::{LayoutTree, NodeId};

/// Layout and anchor registration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Anchor index outside `0..count`.
    #[error("anchor index {index} out of range (step count {count})")]
    InvalidIndex { index: usize, count: usize },

    /// Measured or resolved bounds are unusable.
    #[error("invalid geometry for anchor {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },

    /// A container contribution is malformed.
    #[error("invalid container contribution: {0}")]
    InvalidContribution(String),

    /// The node does not exist in this tree.
    #[error("unknown layout node {0}")]
    UnknownNode(NodeId),
}
