#![forbid(unsafe_code)]

//! Anchor registry: step index → global bounds for the current layout.
//!
//! # Layout passes
//!
//! The registry follows the host's layout passes:
//!
//! 1. [`AnchorRegistry::begin_layout_pass`] opens a new generation and
//!    discards every stored anchor.
//! 2. The host lays out, measures each target inside its parent, and calls
//!    [`AnchorRegistry::register`] (or [`AnchorRegistry::register_in_tree`]).
//! 3. [`AnchorRegistry::settle`] closes the pass.
//!
//! [`AnchorRegistry::resolve`] only answers for anchors registered in the
//! current generation after it settled. Geometry from a previous layout is
//! never served; callers wait for the next settle instead.
//!
//! # Invariants
//!
//! 1. Every stored [`AnchorGeometry`] has finite, non-negative size.
//! 2. Global bounds equal local bounds translated by the full chain sum.
//! 3. A tree whose generation moved on invalidates every anchor.

use std::collections::BTreeMap;

use spotlight_core::geometry::{Point, Rect, Size};

use crate::LayoutError;
use crate::chain::OffsetChain;
use crate::tree::{LayoutTree, NodeId};

/// Resolved bounds of one target in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorGeometry {
    bounds: Rect,
    generation: u64,
}

impl AnchorGeometry {
    /// Left edge.
    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    /// Top edge.
    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    /// Width (never negative).
    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    /// Height (never negative).
    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// Global bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Size.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Layout generation the bounds were measured in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Index → geometry map tied to layout generations.
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    anchors: BTreeMap<usize, AnchorGeometry>,
    step_count: Option<usize>,
    generation: u64,
    settled: bool,
    tree_generation: Option<u64>,
}

impl AnchorRegistry {
    /// Registry that accepts any index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that rejects indices outside `0..step_count`.
    pub fn with_step_count(step_count: usize) -> Self {
        Self {
            step_count: Some(step_count),
            ..Self::default()
        }
    }

    /// Change the accepted index range, dropping anchors beyond it.
    pub fn set_step_count(&mut self, step_count: usize) {
        self.step_count = Some(step_count);
        self.anchors.retain(|index, _| *index < step_count);
    }

    /// Current layout generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the current pass has settled.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Number of stored anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no anchors are stored.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Open a new layout pass. All stored geometry is discarded.
    ///
    /// Returns the new generation.
    pub fn begin_layout_pass(&mut self) -> u64 {
        self.generation += 1;
        self.settled = false;
        let dropped = self.anchors.len();
        self.anchors.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "spotlight::layout",
            generation = self.generation,
            dropped,
            "layout pass opened"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = dropped;
        self.generation
    }

    /// Close the current pass; anchors registered in it become resolvable.
    pub fn settle(&mut self) {
        self.settled = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "spotlight::layout",
            generation = self.generation,
            anchors = self.anchors.len(),
            "layout pass settled"
        );
    }

    /// Open a new pass if `tree` changed since it was last observed.
    ///
    /// Returns `true` when stale anchors were discarded.
    pub fn sync_tree(&mut self, tree: &LayoutTree) -> bool {
        let seen = tree.generation();
        match self.tree_generation {
            Some(previous) if previous == seen => false,
            Some(_) => {
                self.tree_generation = Some(seen);
                self.begin_layout_pass();
                true
            }
            None => {
                self.tree_generation = Some(seen);
                false
            }
        }
    }

    /// Record `index`'s bounds.
    ///
    /// `local` is measured inside the target's immediate parent; `chain`
    /// lists every ancestor from the root down to that parent. Replaces any
    /// geometry previously stored for `index`.
    pub fn register(
        &mut self,
        index: usize,
        local: Rect,
        chain: &OffsetChain,
    ) -> Result<AnchorGeometry, LayoutError> {
        self.check_index(index)?;
        if !local.is_well_formed() {
            return Err(LayoutError::InvalidGeometry {
                index,
                reason: format!("local bounds must be finite with non-negative size: {local:?}"),
            });
        }
        chain.validate()?;

        let bounds = chain.resolve(local);
        if !bounds.is_well_formed() {
            return Err(LayoutError::InvalidGeometry {
                index,
                reason: format!("resolved bounds overflowed: {bounds:?}"),
            });
        }

        let geometry = AnchorGeometry {
            bounds,
            generation: self.generation,
        };
        self.anchors.insert(index, geometry);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "spotlight::layout",
            index,
            depth = chain.len(),
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "anchor registered"
        );
        Ok(geometry)
    }

    /// Record `index`'s bounds measured inside `parent` of `tree`.
    ///
    /// The chain is built by walking `parent`'s ancestors. If the tree changed
    /// since the registry last saw it, a new layout pass is opened first.
    pub fn register_in_tree(
        &mut self,
        index: usize,
        local: Rect,
        tree: &LayoutTree,
        parent: NodeId,
    ) -> Result<AnchorGeometry, LayoutError> {
        self.sync_tree(tree);
        let chain = tree.chain(parent)?;
        self.register(index, local, &chain)
    }

    /// Fresh geometry for `index`, if any.
    pub fn resolve(&self, index: usize) -> Option<AnchorGeometry> {
        if !self.settled {
            return None;
        }
        self.anchors
            .get(&index)
            .copied()
            .filter(|g| g.generation == self.generation)
    }

    /// Whether [`resolve`](Self::resolve) would answer for `index`.
    pub fn is_fresh(&self, index: usize) -> bool {
        self.resolve(index).is_some()
    }

    /// Forget one anchor.
    pub fn invalidate(&mut self, index: usize) -> Option<AnchorGeometry> {
        self.anchors.remove(&index)
    }

    /// Forget every anchor without opening a new pass.
    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    /// Stored anchors in index order (fresh or not yet settled).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &AnchorGeometry)> {
        self.anchors.iter().map(|(index, geometry)| (*index, geometry))
    }

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        match self.step_count {
            Some(count) if index >= count => Err(LayoutError::InvalidIndex { index, count }),
            _ => Ok(()),
        }
    }
}
