#![forbid(unsafe_code)]

//! Dialog placement next to a highlighted anchor.
//!
//! The dialog sits above or below the cutout, aligned horizontally to it.
//! Placement follows a fixed order:
//!
//! 1. Shrink the dialog to the viewport if it is larger in either axis.
//! 2. Try the preferred side; if the dialog would overflow there, flip.
//! 3. If neither side fits, take whichever has more room.
//! 4. Clamp both axes so the dialog never leaves the viewport.

use spotlight_core::geometry::{Rect, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal alignment of the dialog relative to the cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Alignment {
    /// Left edges line up.
    Start,
    /// Centers line up.
    #[default]
    CenterHorizontal,
    /// Right edges line up.
    End,
}

/// Preferred vertical side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Position {
    /// Below when it fits, otherwise above.
    #[default]
    Auto,
    /// Prefer above.
    Top,
    /// Prefer below.
    Bottom,
}

/// Side the dialog ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Side {
    Above,
    Below,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

/// Result of [`place_dialog`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialogPlacement {
    /// Final dialog rectangle, always inside the viewport.
    pub rect: Rect,
    /// Side relative to the cutout.
    pub side: Side,
    /// The preferred side overflowed and the opposite side was used.
    pub flipped: bool,
    /// The rectangle was moved or shrunk to stay in the viewport.
    pub clamped: bool,
}

/// Everything placement depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Bounds of the cutout the dialog points at.
    pub hole: Rect,
    /// Desired dialog size.
    pub dialog: Size,
    /// Drawable area.
    pub viewport: Rect,
    pub alignment: Alignment,
    pub position: Position,
    /// Gap between cutout and dialog.
    pub margin: f32,
}

impl PlacementRequest {
    fn available(&self, side: Side) -> f32 {
        match side {
            Side::Above => self.hole.y - self.viewport.y - self.margin,
            Side::Below => self.viewport.bottom() - self.hole.bottom() - self.margin,
        }
    }

    fn resolve_side(&self, height: f32) -> (Side, bool) {
        let primary = match self.position {
            Position::Top => Side::Above,
            Position::Bottom | Position::Auto => Side::Below,
        };
        let available = self.available(primary);
        if available >= height {
            return (primary, false);
        }

        let flipped = primary.flip();
        let flipped_available = self.available(flipped);
        if flipped_available >= height || flipped_available > available {
            (flipped, true)
        } else {
            (primary, false)
        }
    }
}

/// Place a dialog of `dialog` size next to `hole` inside `viewport`.
pub fn place_dialog(
    hole: Rect,
    dialog: Size,
    viewport: Rect,
    alignment: Alignment,
    position: Position,
    margin: f32,
) -> DialogPlacement {
    PlacementRequest {
        hole,
        dialog,
        viewport,
        alignment,
        position,
        margin,
    }
    .place()
}

impl PlacementRequest {
    /// Run the placement.
    pub fn place(&self) -> DialogPlacement {
        let viewport = self.viewport;
        let width = self.dialog.width.max(0.0).min(viewport.width);
        let height = self.dialog.height.max(0.0).min(viewport.height);
        let mut clamped = width < self.dialog.width || height < self.dialog.height;

        let (side, flipped) = self.resolve_side(height);
        let y = match side {
            Side::Above => self.hole.y - self.margin - height,
            Side::Below => self.hole.bottom() + self.margin,
        };
        let x = match self.alignment {
            Alignment::Start => self.hole.x,
            Alignment::CenterHorizontal => self.hole.center().x - width / 2.0,
            Alignment::End => self.hole.right() - width,
        };

        let cx = clamp_axis(x, width, viewport.x, viewport.right());
        let cy = clamp_axis(y, height, viewport.y, viewport.bottom());
        clamped |= cx != x || cy != y;

        DialogPlacement {
            rect: Rect::new(cx, cy, width, height),
            side,
            flipped,
            clamped,
        }
    }
}

/// Keep `[start, start + extent]` inside `[lo, hi]`.
fn clamp_axis(start: f32, extent: f32, lo: f32, hi: f32) -> f32 {
    if !start.is_finite() {
        return lo;
    }
    if start + extent > hi {
        (hi - extent).max(lo)
    } else {
        start.max(lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);
    const DIALOG: Size = Size::new(200.0, 100.0);

    fn place(hole: Rect, alignment: Alignment, position: Position) -> DialogPlacement {
        place_dialog(hole, DIALOG, VIEWPORT, alignment, position, 8.0)
    }

    #[test]
    fn auto_prefers_below_and_centers() {
        let hole = Rect::new(100.0, 100.0, 200.0, 50.0);
        let placed = place(hole, Alignment::CenterHorizontal, Position::Auto);
        assert_eq!(placed.rect, Rect::new(100.0, 158.0, 200.0, 100.0));
        assert_eq!(placed.side, Side::Below);
        assert!(!placed.flipped);
        assert!(!placed.clamped);
    }

    #[test]
    fn start_and_end_alignment() {
        let hole = Rect::new(100.0, 100.0, 250.0, 50.0);
        let start = place(hole, Alignment::Start, Position::Bottom);
        assert_eq!(start.rect.x, 100.0);
        let end = place(hole, Alignment::End, Position::Bottom);
        assert_eq!(end.rect.right(), 350.0);
    }

    #[test]
    fn top_is_honored_when_it_fits() {
        let hole = Rect::new(100.0, 400.0, 200.0, 50.0);
        let placed = place(hole, Alignment::CenterHorizontal, Position::Top);
        assert_eq!(placed.side, Side::Above);
        assert_eq!(placed.rect.bottom(), 392.0);
    }

    #[test]
    fn flips_when_preferred_side_overflows() {
        let near_bottom = Rect::new(100.0, 700.0, 200.0, 50.0);
        let placed = place(near_bottom, Alignment::CenterHorizontal, Position::Bottom);
        assert_eq!(placed.side, Side::Above);
        assert!(placed.flipped);
        assert_eq!(placed.rect.y, 592.0);

        let near_top = Rect::new(100.0, 20.0, 200.0, 50.0);
        let placed = place(near_top, Alignment::CenterHorizontal, Position::Top);
        assert_eq!(placed.side, Side::Below);
        assert!(placed.flipped);
    }

    #[test]
    fn clamps_horizontally_near_the_edge() {
        let hole = Rect::new(350.0, 100.0, 40.0, 40.0);
        let placed = place(hole, Alignment::CenterHorizontal, Position::Auto);
        assert_eq!(placed.rect.right(), 400.0);
        assert!(placed.clamped);

        let hole = Rect::new(0.0, 100.0, 40.0, 40.0);
        let placed = place(hole, Alignment::End, Position::Auto);
        assert_eq!(placed.rect.x, 0.0);
    }

    #[test]
    fn hole_filling_the_viewport_still_places_inside() {
        let placed = place(VIEWPORT, Alignment::CenterHorizontal, Position::Auto);
        assert!(VIEWPORT.contains_rect(&placed.rect));
        assert!(placed.clamped);
    }

    #[test]
    fn oversized_dialog_is_shrunk() {
        let placed = place_dialog(
            Rect::new(10.0, 10.0, 10.0, 10.0),
            Size::new(1000.0, 1000.0),
            VIEWPORT,
            Alignment::Start,
            Position::Auto,
            8.0,
        );
        assert_eq!(placed.rect, VIEWPORT);
        assert!(placed.clamped);
    }

    #[test]
    fn offset_viewport_is_respected() {
        let viewport = Rect::new(50.0, 50.0, 300.0, 300.0);
        let placed = place_dialog(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            DIALOG,
            viewport,
            Alignment::Start,
            Position::Auto,
            8.0,
        );
        assert!(viewport.contains_rect(&placed.rect));
    }
}
