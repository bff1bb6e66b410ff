#![forbid(unsafe_code)]

//! Backdrop, cutout, and dialog for the active step.
//!
//! [`compose`] is the pure geometric half: anchor bounds plus a style give a
//! cutout outline and a dialog rectangle. [`OverlayRenderer`] adds state: it
//! remembers which step it is showing, drives the [`BackdropFade`], and
//! guarantees that at most one overlay exists at a time.

use std::time::Duration;

use spotlight_core::animation::{AnimationDuration, BackdropFade, BackgroundAlpha, FadePhase};
use spotlight_core::geometry::{Point, Rect, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::OverlayError;
use crate::placement::{Alignment, DialogPlacement, PlacementRequest, Position};
use crate::shape::{HighlightShape, Outline};

/// Default gap between the cutout and the dialog.
pub const DEFAULT_DIALOG_MARGIN: f32 = 16.0;

/// Visual configuration of one step's overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayStyle {
    pub shape: HighlightShape,
    pub alignment: Alignment,
    pub position: Position,
    pub dialog_margin: f32,
    pub background_alpha: BackgroundAlpha,
    pub animation_duration: AnimationDuration,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            shape: HighlightShape::default(),
            alignment: Alignment::default(),
            position: Position::default(),
            dialog_margin: DEFAULT_DIALOG_MARGIN,
            background_alpha: BackgroundAlpha::default(),
            animation_duration: AnimationDuration::default(),
        }
    }
}

impl OverlayStyle {
    #[must_use]
    pub fn shape(mut self, shape: HighlightShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn dialog_margin(mut self, margin: f32) -> Self {
        self.dialog_margin = margin;
        self
    }

    #[must_use]
    pub fn background_alpha(mut self, alpha: BackgroundAlpha) -> Self {
        self.background_alpha = alpha;
        self
    }

    #[must_use]
    pub fn animation_duration(mut self, duration: AnimationDuration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Check every numeric parameter.
    pub fn validate(&self) -> Result<(), OverlayError> {
        self.shape.validate()?;
        self.background_alpha
            .validate()
            .map_err(OverlayError::InvalidAlpha)?;
        if !(self.dialog_margin.is_finite() && self.dialog_margin >= 0.0) {
            return Err(OverlayError::InvalidMargin(self.dialog_margin));
        }
        Ok(())
    }
}

/// Identity of what is being highlighted.
///
/// The fade restarts whenever this changes; re-rendering the same target
/// (e.g. after a resize) keeps the running fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderTarget {
    /// Sequence run the step belongs to.
    pub run: u64,
    /// Step index.
    pub step: usize,
}

impl RenderTarget {
    pub const fn new(run: u64, step: usize) -> Self {
        Self { run, step }
    }
}

/// A composed overlay for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlay {
    pub target: RenderTarget,
    /// Global anchor bounds the overlay was built from.
    pub anchor: Rect,
    pub hole: Outline,
    pub dialog: DialogPlacement,
}

/// Snapshot of what should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverlayFrame {
    pub target: RenderTarget,
    pub hole: Outline,
    pub dialog: Rect,
    pub backdrop_alpha: f32,
    pub phase: FadePhase,
}

impl OverlayFrame {
    /// Whether `point` is covered by the dimmed backdrop.
    pub fn is_dimmed(&self, point: Point) -> bool {
        self.backdrop_alpha > 0.0 && !self.hole.contains(point) && !self.dialog.contains(point)
    }
}

/// Compute the cutout and dialog rectangle for an anchor.
pub fn compose(
    anchor: Rect,
    style: &OverlayStyle,
    dialog: Size,
    viewport: Rect,
) -> (Outline, DialogPlacement) {
    let hole = style.shape.resolve(anchor);
    let placement = PlacementRequest {
        hole: hole.bounds(),
        dialog,
        viewport,
        alignment: style.alignment,
        position: style.position,
        margin: style.dialog_margin,
    }
    .place();
    (hole, placement)
}

/// Stateful overlay owner.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    viewport: Rect,
    fade: BackdropFade,
    current: Option<Overlay>,
}

impl OverlayRenderer {
    /// Create a renderer for the given drawable area.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            fade: BackdropFade::new(),
            current: None,
        }
    }

    /// Use a preconfigured fade (e.g. custom easing).
    #[must_use]
    pub fn with_fade(mut self, fade: BackdropFade) -> Self {
        self.fade = fade;
        self
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Change the drawable area. The current overlay keeps its placement
    /// until it is shown again.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Build and show the overlay for `target`.
    ///
    /// Replaces any existing overlay. The backdrop fades in when the target
    /// differs from the one currently shown.
    pub fn show(
        &mut self,
        target: RenderTarget,
        anchor: Rect,
        style: &OverlayStyle,
        dialog: Size,
    ) -> Result<&Overlay, OverlayError> {
        style.validate()?;
        if !anchor.is_well_formed() {
            return Err(OverlayError::InvalidAnchor(anchor));
        }
        if !(dialog.width.is_finite() && dialog.height.is_finite())
            || dialog.width < 0.0
            || dialog.height < 0.0
        {
            return Err(OverlayError::InvalidDialogSize(dialog));
        }

        let (hole, placement) = compose(anchor, style, dialog, self.viewport);
        let retarget = self.current.map(|o| o.target) != Some(target);
        if retarget {
            self.fade
                .fade_in(style.background_alpha.value(), style.animation_duration);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "spotlight::overlay",
            run = target.run,
            step = target.step,
            retarget,
            flipped = placement.flipped,
            clamped = placement.clamped,
            "overlay shown"
        );

        Ok(self.current.insert(Overlay {
            target,
            anchor,
            hole,
            dialog: placement,
        }))
    }

    /// Remove the overlay and start fading the backdrop out.
    pub fn teardown(&mut self) -> Option<Overlay> {
        let removed = self.current.take();
        if removed.is_some() {
            self.fade.fade_out();
        }
        removed
    }

    /// Remove the overlay and drop the backdrop immediately.
    pub fn cancel(&mut self) -> Option<Overlay> {
        self.fade.cancel();
        self.current.take()
    }

    /// The overlay currently shown.
    pub fn current(&self) -> Option<&Overlay> {
        self.current.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Drawable snapshot, if an overlay is shown.
    pub fn frame(&self) -> Option<OverlayFrame> {
        self.current.map(|overlay| OverlayFrame {
            target: overlay.target,
            hole: overlay.hole,
            dialog: overlay.dialog.rect,
            backdrop_alpha: self.fade.alpha(),
            phase: self.fade.phase(),
        })
    }

    /// Current backdrop opacity, including a fade-out after teardown.
    pub fn backdrop_alpha(&self) -> f32 {
        self.fade.alpha()
    }

    pub fn phase(&self) -> FadePhase {
        self.fade.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_animating()
    }

    /// Advance the fade. Returns `true` if its phase changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.fade.tick(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Side;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 360.0, 640.0);
    const DIALOG: Size = Size::new(200.0, 80.0);
    const CARD: Rect = Rect::new(40.0, 104.0, 280.0, 120.0);

    fn card_style() -> OverlayStyle {
        OverlayStyle::default()
            .shape(HighlightShape::rectangular(8.0))
            .animation_duration(AnimationDuration::FAST)
    }

    #[test]
    fn compose_places_dialog_below_card() {
        let (hole, placement) = compose(CARD, &card_style(), DIALOG, VIEWPORT);
        assert_eq!(hole.bounds(), CARD);
        assert_eq!(placement.side, Side::Below);
        assert_eq!(placement.rect, Rect::new(80.0, 240.0, 200.0, 80.0));
    }

    #[test]
    fn show_fades_in_then_settles() {
        let mut renderer = OverlayRenderer::new(VIEWPORT);
        renderer
            .show(RenderTarget::new(1, 0), CARD, &card_style(), DIALOG)
            .unwrap();
        assert_eq!(renderer.phase(), FadePhase::FadingIn);
        assert_eq!(renderer.backdrop_alpha(), 0.0);

        assert!(renderer.tick(Duration::from_millis(300)));
        assert_eq!(renderer.phase(), FadePhase::Visible);
        let frame = renderer.frame().unwrap();
        assert_eq!(frame.backdrop_alpha, 0.6);
        assert!(frame.is_dimmed(Point::new(5.0, 5.0)));
        assert!(!frame.is_dimmed(CARD.center()));
    }

    #[test]
    fn same_target_does_not_restart_fade() {
        let mut renderer = OverlayRenderer::new(VIEWPORT);
        let target = RenderTarget::new(1, 0);
        renderer.show(target, CARD, &card_style(), DIALOG).unwrap();
        renderer.tick(Duration::from_millis(300));
        renderer.set_viewport(Rect::new(0.0, 0.0, 640.0, 360.0));
        renderer.show(target, CARD, &card_style(), DIALOG).unwrap();
        assert_eq!(renderer.phase(), FadePhase::Visible);
    }

    #[test]
    fn only_one_overlay_exists() {
        let mut renderer = OverlayRenderer::new(VIEWPORT);
        renderer
            .show(RenderTarget::new(1, 0), CARD, &card_style(), DIALOG)
            .unwrap();
        let old = renderer.teardown().unwrap();
        assert_eq!(old.target.step, 0);
        assert!(!renderer.is_showing());

        let button = Rect::new(40.0, 240.0, 120.0, 48.0);
        let style = card_style().shape(HighlightShape::circular(8.0));
        renderer
            .show(RenderTarget::new(1, 1), button, &style, DIALOG)
            .unwrap();
        assert_eq!(renderer.current().unwrap().target.step, 1);
        assert_eq!(renderer.phase(), FadePhase::FadingIn);
    }

    #[test]
    fn teardown_fades_out_and_cancel_is_immediate() {
        let mut renderer = OverlayRenderer::new(VIEWPORT);
        renderer
            .show(RenderTarget::new(1, 0), CARD, &card_style(), DIALOG)
            .unwrap();
        renderer.tick(Duration::from_millis(300));

        renderer.teardown();
        assert_eq!(renderer.phase(), FadePhase::FadingOut);
        assert!(renderer.frame().is_none());
        assert!(renderer.backdrop_alpha() > 0.0);
        renderer.tick(Duration::from_millis(150));
        assert_eq!(renderer.phase(), FadePhase::Hidden);

        renderer
            .show(RenderTarget::new(2, 0), CARD, &card_style(), DIALOG)
            .unwrap();
        assert!(renderer.cancel().is_some());
        assert_eq!(renderer.phase(), FadePhase::Hidden);
        assert_eq!(renderer.backdrop_alpha(), 0.0);
        assert!(renderer.cancel().is_none());
    }

    #[test]
    fn invalid_inputs_leave_renderer_untouched() {
        let mut renderer = OverlayRenderer::new(VIEWPORT);
        let bad_alpha = card_style().background_alpha(BackgroundAlpha::Custom(1.5));
        assert_eq!(
            renderer
                .show(RenderTarget::new(1, 0), CARD, &bad_alpha, DIALOG)
                .unwrap_err(),
            OverlayError::InvalidAlpha(1.5)
        );
        let nan = Rect::new(f32::NAN, 0.0, 1.0, 1.0);
        assert!(matches!(
            renderer.show(RenderTarget::new(1, 0), nan, &card_style(), DIALOG),
            Err(OverlayError::InvalidAnchor(_))
        ));
        assert!(!renderer.is_showing());
        assert_eq!(renderer.phase(), FadePhase::Hidden);
    }
}
