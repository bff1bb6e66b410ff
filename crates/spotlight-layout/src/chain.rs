#![forbid(unsafe_code)]

//! Offset chains: the ancestors between an element and the coordinate root.
//!
//! Each ancestor container shifts its descendants. A [`Contribution`]
//! captures every way it can do so (its own position inside its parent, its
//! padding, a container-managed inset such as the space reserved for a top
//! bar, and its scroll position). An [`OffsetChain`] lists contributions
//! from the outermost container inward and collapses them into one
//! translation.
//!
//! # Invariants
//!
//! 1. `chain.translation()` equals the vector sum of every link's
//!    `translation()`, for any depth.
//! 2. `chain.resolve(local)` keeps the size of `local`.
//! 3. The sum of [`OffsetChain::decompose`] reconstructs `translation()`.

use spotlight_core::geometry::{Offset, Rect, Sides};

use crate::LayoutError;

/// How one ancestor container shifts its content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contribution {
    /// Position of the container inside its own parent.
    pub offset: Offset,
    /// Padding applied by the container itself.
    pub padding: Sides,
    /// Space reserved by the container on behalf of others (top bars,
    /// system insets). Applied like padding but tracked separately so a
    /// change of inset is visible on its own.
    pub inset: Sides,
    /// Scroll position; content moves opposite to it.
    pub scroll: Offset,
}

impl Contribution {
    /// A contribution that shifts nothing.
    pub const NONE: Self = Self {
        offset: Offset::ZERO,
        padding: Sides::ZERO,
        inset: Sides::ZERO,
        scroll: Offset::ZERO,
    };

    /// Pure translation.
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self {
            offset: Offset::new(dx, dy),
            ..Self::NONE
        }
    }

    /// Padding only.
    pub const fn padded(padding: Sides) -> Self {
        Self {
            padding,
            ..Self::NONE
        }
    }

    /// Container-managed inset only.
    pub const fn inset_by(inset: Sides) -> Self {
        Self {
            inset,
            ..Self::NONE
        }
    }

    /// Set the position inside the parent.
    #[must_use]
    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = Offset::new(dx, dy);
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the inset.
    #[must_use]
    pub fn inset(mut self, inset: impl Into<Sides>) -> Self {
        self.inset = inset.into();
        self
    }

    /// Set the scroll position.
    #[must_use]
    pub fn scroll(mut self, x: f32, y: f32) -> Self {
        self.scroll = Offset::new(x, y);
        self
    }

    /// Net shift applied to this container's content.
    #[inline]
    pub fn translation(&self) -> Offset {
        self.offset + self.padding.leading_offset() + self.inset.leading_offset() - self.scroll
    }

    /// Reject non-finite values and negative padding/insets.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.offset.is_finite() || !self.scroll.is_finite() {
            return Err(LayoutError::InvalidContribution(format!(
                "non-finite offset or scroll: {self:?}"
            )));
        }
        if !self.padding.is_valid() || !self.inset.is_valid() {
            return Err(LayoutError::InvalidContribution(format!(
                "padding and inset must be finite and non-negative: {self:?}"
            )));
        }
        Ok(())
    }
}

impl From<Offset> for Contribution {
    fn from(offset: Offset) -> Self {
        Self {
            offset,
            ..Self::NONE
        }
    }
}

impl From<(f32, f32)> for Contribution {
    fn from((dx, dy): (f32, f32)) -> Self {
        Self::translate(dx, dy)
    }
}

/// Ordered ancestor contributions, outermost first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetChain {
    links: Vec<Contribution>,
}

impl OffsetChain {
    /// Empty chain (element measured directly in root coordinates).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inner ancestor (builder pattern).
    #[must_use]
    pub fn with(mut self, link: impl Into<Contribution>) -> Self {
        self.links.push(link.into());
        self
    }

    /// Append an inner ancestor.
    pub fn push(&mut self, link: impl Into<Contribution>) {
        self.links.push(link.into());
    }

    /// Number of ancestors.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no ancestors.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Contribution> {
        self.links.iter()
    }

    /// Vector sum of every link.
    pub fn translation(&self) -> Offset {
        self.links.iter().map(Contribution::translation).sum()
    }

    /// Sum of the outermost `depth` links only.
    ///
    /// `partial(len())` equals `translation()`; smaller depths show what an
    /// accumulation that stops early would produce.
    pub fn partial(&self, depth: usize) -> Offset {
        self.links
            .iter()
            .take(depth)
            .map(Contribution::translation)
            .sum()
    }

    /// Per-link translations, outermost first.
    pub fn decompose(&self) -> Vec<Offset> {
        self.links.iter().map(Contribution::translation).collect()
    }

    /// Translate bounds measured inside the innermost ancestor into root
    /// coordinates.
    pub fn resolve(&self, local: Rect) -> Rect {
        local.translate(self.translation())
    }

    /// Validate every link.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.links.iter().try_for_each(Contribution::validate)
    }
}

impl FromIterator<Contribution> for OffsetChain {
    fn from_iter<I: IntoIterator<Item = Contribution>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OffsetChain {
    type Item = &'a Contribution;
    type IntoIter = std::slice::Iter<'a, Contribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
