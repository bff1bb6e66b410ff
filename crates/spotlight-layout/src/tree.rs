#![forbid(unsafe_code)]

//! Arena of nested layout containers.
//!
//! A [`LayoutTree`] mirrors the host's container nesting closely enough to
//! answer one question: what is the translation from a container's content
//! space to the root? Nodes are appended under a parent and never removed;
//! changing a node's [`Contribution`] bumps the tree [`generation`], which
//! tells the anchor registry that every previously measured anchor is stale.
//!
//! [`generation`]: LayoutTree::generation

use std::fmt;

use spotlight_core::geometry::Offset;

use crate::LayoutError;
use crate::chain::{Contribution, OffsetChain};

/// Handle to a container in a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    contribution: Contribution,
    label: Option<String>,
}

/// Nested containers, each contributing a translation.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: Vec<Node>,
    generation: u64,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new(Contribution::NONE)
    }
}

impl LayoutTree {
    /// Create a tree whose root is the window.
    ///
    /// `window` is the window's own contribution, e.g. its position on a
    /// larger screen.
    pub fn new(window: Contribution) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                contribution: window,
                label: Some("window".to_string()),
            }],
            generation: 0,
        }
    }

    /// The window node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of containers, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Incremented every time a contribution changes or a node is added.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append a container under `parent`.
    pub fn push(
        &mut self,
        parent: NodeId,
        contribution: impl Into<Contribution>,
    ) -> Result<NodeId, LayoutError> {
        self.insert(parent, contribution.into(), None)
    }

    /// Append a labeled container under `parent`.
    pub fn push_labeled(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        contribution: impl Into<Contribution>,
    ) -> Result<NodeId, LayoutError> {
        self.insert(parent, contribution.into(), Some(label.into()))
    }

    fn insert(
        &mut self,
        parent: NodeId,
        contribution: Contribution,
        label: Option<String>,
    ) -> Result<NodeId, LayoutError> {
        self.node(parent)?;
        contribution.validate()?;
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| LayoutError::InvalidContribution("layout tree is full".to_string()))?;
        self.nodes.push(Node {
            parent: Some(parent),
            contribution,
            label,
        });
        self.generation += 1;
        Ok(id)
    }

    /// Replace a container's contribution (e.g. the inset changed).
    ///
    /// Bumps the generation only if the value actually changed.
    pub fn set_contribution(
        &mut self,
        node: NodeId,
        contribution: impl Into<Contribution>,
    ) -> Result<(), LayoutError> {
        let contribution = contribution.into();
        contribution.validate()?;
        let slot = self
            .nodes
            .get_mut(node.index())
            .ok_or(LayoutError::UnknownNode(node))?;
        if slot.contribution != contribution {
            slot.contribution = contribution;
            self.generation += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "spotlight::layout",
                %node,
                generation = self.generation,
                "container contribution changed"
            );
        }
        Ok(())
    }

    /// A container's current contribution.
    pub fn contribution(&self, node: NodeId) -> Result<&Contribution, LayoutError> {
        self.node(node).map(|n| &n.contribution)
    }

    /// The parent of `node` (`None` for the root).
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, LayoutError> {
        self.node(node).map(|n| n.parent)
    }

    /// Label given at insertion.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.index())
            .and_then(|n| n.label.as_deref())
    }

    /// Number of ancestors above `node` (0 for the root).
    pub fn depth(&self, node: NodeId) -> Result<usize, LayoutError> {
        Ok(self.ancestry(node)?.len() - 1)
    }

    /// Contributions from the root down to and including `node`.
    ///
    /// Bounds measured inside `node` resolve to root coordinates through
    /// this chain.
    pub fn chain(&self, node: NodeId) -> Result<OffsetChain, LayoutError> {
        Ok(self
            .ancestry(node)?
            .into_iter()
            .rev()
            .map(|id| self.nodes[id.index()].contribution)
            .collect())
    }

    /// Translation from `node`'s content space to the root.
    pub fn origin(&self, node: NodeId) -> Result<Offset, LayoutError> {
        self.chain(node).map(|chain| chain.translation())
    }

    /// `node` followed by its ancestors up to the root.
    fn ancestry(&self, node: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let current = self.node(id)?;
            path.push(id);
            cursor = current.parent;
        }
        Ok(path)
    }

    fn node(&self, node: NodeId) -> Result<&Node, LayoutError> {
        self.nodes
            .get(node.index())
            .ok_or(LayoutError::UnknownNode(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_core::geometry::{Rect, Sides};

    fn padded_screen() -> (LayoutTree, NodeId, NodeId) {
        let mut tree = LayoutTree::default();
        let scaffold = tree
            .push_labeled(tree.root(), "scaffold", Contribution::inset_by(Sides::top(64.0)))
            .unwrap();
        let screen = tree
            .push_labeled(scaffold, "screen", Contribution::padded(Sides::all(16.0)))
            .unwrap();
        let surface = tree
            .push_labeled(screen, "surface", Contribution::padded(Sides::all(8.0)))
            .unwrap();
        let content = tree
            .push_labeled(surface, "content", Contribution::padded(Sides::all(16.0)))
            .unwrap();
        (tree, scaffold, content)
    }

    #[test]
    fn origin_walks_every_ancestor() {
        let (tree, _, content) = padded_screen();
        assert_eq!(tree.origin(content).unwrap(), Offset::new(40.0, 104.0));
        assert_eq!(tree.depth(content).unwrap(), 4);
        assert_eq!(tree.chain(content).unwrap().len(), 5);
        assert_eq!(tree.label(content), Some("content"));
    }

    #[test]
    fn chain_is_outermost_first() {
        let (tree, scaffold, content) = padded_screen();
        let chain = tree.chain(content).unwrap();
        let first = chain.iter().next().copied().unwrap();
        assert_eq!(first, Contribution::NONE);
        let second = chain.iter().nth(1).copied().unwrap();
        assert_eq!(second, *tree.contribution(scaffold).unwrap());
    }

    #[test]
    fn inset_change_moves_descendants_and_bumps_generation() {
        let (mut tree, scaffold, content) = padded_screen();
        let before = tree.generation();
        tree.set_contribution(scaffold, Contribution::inset_by(Sides::top(56.0)))
            .unwrap();
        assert!(tree.generation() > before);
        assert_eq!(tree.origin(content).unwrap(), Offset::new(40.0, 96.0));

        let unchanged = tree.generation();
        tree.set_contribution(scaffold, Contribution::inset_by(Sides::top(56.0)))
            .unwrap();
        assert_eq!(tree.generation(), unchanged);
    }

    #[test]
    fn window_position_is_part_of_the_chain() {
        let mut tree = LayoutTree::new(Contribution::translate(100.0, 50.0));
        let child = tree.push(tree.root(), (10.0, 10.0)).unwrap();
        let local = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            tree.chain(child).unwrap().resolve(local),
            Rect::new(111.0, 62.0, 3.0, 4.0)
        );
    }

    #[test]
    fn unknown_node_is_rejected() {
        let mut tree = LayoutTree::default();
        let ghost = NodeId(42);
        assert!(matches!(
            tree.push(ghost, Contribution::NONE),
            Err(LayoutError::UnknownNode(id)) if id == ghost
        ));
        assert!(tree.origin(ghost).is_err());
        assert!(tree.set_contribution(ghost, Contribution::NONE).is_err());
    }

    #[test]
    fn invalid_contribution_is_rejected() {
        let mut tree = LayoutTree::default();
        let root = tree.root();
        assert!(matches!(
            tree.push(root, Contribution::padded(Sides::all(-4.0))),
            Err(LayoutError::InvalidContribution(_))
        ));
        assert_eq!(tree.len(), 1);
    }
}
