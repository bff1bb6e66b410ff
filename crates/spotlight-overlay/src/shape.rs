#![forbid(unsafe_code)]

//! Highlight shapes and the outlines they resolve to.
//!
//! A [`HighlightShape`] is a declarative descriptor attached to a step; an
//! [`Outline`] is the concrete geometry cut out of the backdrop once the
//! anchor's bounds are known. [`HighlightShape::resolve`] is pure.

use spotlight_core::geometry::{Point, Rect, Sides};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::OverlayError;

/// How the anchor is cut out of the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum HighlightShape {
    /// The anchor's rectangle, grown by `padding`, with rounded corners.
    Rectangular { corner_radius: f32, padding: f32 },
    /// A circle around the anchor's center.
    Circular { target_margin: f32 },
}

impl Default for HighlightShape {
    fn default() -> Self {
        Self::rectangular(0.0)
    }
}

impl HighlightShape {
    /// Rounded rectangle hugging the anchor.
    pub const fn rectangular(corner_radius: f32) -> Self {
        Self::Rectangular {
            corner_radius,
            padding: 0.0,
        }
    }

    /// Rounded rectangle with breathing room around the anchor.
    pub const fn rectangular_padded(corner_radius: f32, padding: f32) -> Self {
        Self::Rectangular {
            corner_radius,
            padding,
        }
    }

    /// Circle reaching `target_margin` beyond the anchor's larger half-extent.
    pub const fn circular(target_margin: f32) -> Self {
        Self::Circular { target_margin }
    }

    /// Reject negative or non-finite parameters.
    pub fn validate(&self) -> Result<(), OverlayError> {
        let check = |name: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(OverlayError::InvalidShape { name, value })
            }
        };
        match *self {
            Self::Rectangular {
                corner_radius,
                padding,
            } => {
                check("corner_radius", corner_radius)?;
                check("padding", padding)
            }
            Self::Circular { target_margin } => check("target_margin", target_margin),
        }
    }

    /// Concrete outline for an anchor with the given global bounds.
    pub fn resolve(&self, anchor: Rect) -> Outline {
        match *self {
            Self::Rectangular {
                corner_radius,
                padding,
            } => {
                let rect = anchor.outer(Sides::all(padding));
                let limit = rect.width.min(rect.height) / 2.0;
                Outline::RoundedRect {
                    rect,
                    radius: corner_radius.clamp(0.0, limit.max(0.0)),
                }
            }
            Self::Circular { target_margin } => Outline::Circle {
                center: anchor.center(),
                radius: anchor.width.max(anchor.height) / 2.0 + target_margin,
            },
        }
    }
}

/// Drawable cutout geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum Outline {
    /// Rectangle with radius `radius` on every corner.
    RoundedRect { rect: Rect, radius: f32 },
    /// Circle.
    Circle { center: Point, radius: f32 },
}

impl Outline {
    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::RoundedRect { rect, .. } => rect,
            Self::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }

    /// Whether `point` falls inside the cutout.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Circle { center, radius } => center.distance(point) <= radius,
            Self::RoundedRect { rect, radius } => {
                if point.x < rect.x
                    || point.y < rect.y
                    || point.x > rect.right()
                    || point.y > rect.bottom()
                {
                    return false;
                }
                if radius <= 0.0 {
                    return true;
                }
                // Only the four corner squares need the distance test. With
                // a fully rounded side `x + r` can round past `right - r`.
                let (left, top) = (rect.x + radius, rect.y + radius);
                let right = (rect.right() - radius).max(left);
                let bottom = (rect.bottom() - radius).max(top);
                let nearest = Point::new(
                    point.x.max(left).min(right),
                    point.y.max(top).min(bottom),
                );
                nearest.distance(point) <= radius
            }
        }
    }
}

/// Free-function form of [`HighlightShape::resolve`].
pub fn resolve(shape: &HighlightShape, anchor: Rect) -> Outline {
    shape.resolve(anchor)
}
