#![forbid(unsafe_code)]

//! The host-facing orchestrator.
//!
//! A [`Showcase`] owns the sequence controller, the anchor registry, the
//! layout tree, and the overlay renderer. The host drives it with three
//! kinds of input:
//!
//! 1. Layout: [`begin_layout_pass`](Showcase::begin_layout_pass), one
//!    [`measure`](Showcase::measure) per visible target, then
//!    [`layout_settled`](Showcase::layout_settled).
//! 2. Interaction: [`tap`](Showcase::tap), [`press_action`](Showcase::press_action),
//!    or direct navigation calls.
//! 3. Time: [`tick`](Showcase::tick) for the backdrop fade.
//!
//! Every transition tears down the previous overlay before anything else
//! happens. The new overlay is built only from geometry measured in the
//! current settled pass; until such geometry exists the overlay is pending
//! and [`frame`](Showcase::frame) returns `None`.

use std::time::Duration;

use spotlight_core::geometry::{Point, Rect, Size};
use spotlight_layout::{AnchorGeometry, AnchorRegistry, LayoutTree, NodeId, OffsetChain};
use spotlight_overlay::{Overlay, OverlayFrame, OverlayRenderer, RenderTarget};
use spotlight_sequence::{
    Command, ContentRenderer, DialogContent, SequenceController, SequenceEvent, SequenceState,
    ShowcaseHandle, StepConfig, Transition,
};

use crate::config::ShowcaseConfig;
use crate::error::Result;

/// What to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct ShowcaseFrame<'a> {
    pub overlay: OverlayFrame,
    pub content: &'a DialogContent,
}

/// Where a tap landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// No overlay is shown.
    Nothing,
    /// Inside the highlighted cutout.
    Hole,
    /// On the dialog.
    Dialog,
    /// On the dimmed backdrop.
    Backdrop,
}

/// Overlay sequencing for one screen.
pub struct Showcase {
    config: ShowcaseConfig,
    controller: SequenceController,
    registry: AnchorRegistry,
    tree: LayoutTree,
    renderer: OverlayRenderer,
    handle: ShowcaseHandle,
    content: Option<DialogContent>,
    pending: bool,
    auto_started: bool,
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("state", &self.controller.state())
            .field("steps", &self.controller.len())
            .field("pending", &self.pending)
            .field("generation", &self.registry.generation())
            .finish_non_exhaustive()
    }
}

impl Showcase {
    /// Create a showcase with an empty layout tree.
    pub fn new(config: ShowcaseConfig) -> Result<Self> {
        Self::with_tree(config, LayoutTree::default())
    }

    /// Create a showcase over an existing layout tree.
    pub fn with_tree(config: ShowcaseConfig, tree: LayoutTree) -> Result<Self> {
        config.validate()?;
        let viewport = Rect::from_size(config.viewport.width, config.viewport.height);
        Ok(Self {
            config,
            controller: SequenceController::new(),
            registry: AnchorRegistry::with_step_count(0),
            tree,
            renderer: OverlayRenderer::new(viewport),
            handle: ShowcaseHandle::new(),
            content: None,
            pending: false,
            auto_started: false,
        })
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Handle for posting navigation commands from outside content renderers.
    pub fn handle(&self) -> ShowcaseHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> SequenceState {
        self.controller.state()
    }

    pub fn controller(&self) -> &SequenceController {
        &self.controller
    }

    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Mutable access to the layout tree.
    ///
    /// Any contribution change invalidates stored anchors on the next
    /// resolve.
    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    /// A step config seeded with the configured defaults.
    pub fn step_config(&self) -> StepConfig {
        self.config.step()
    }

    /// Register the step at `index`.
    pub fn register_step(
        &mut self,
        index: usize,
        config: StepConfig,
        content: ContentRenderer,
    ) -> Result<()> {
        self.controller.register(index, config, content)?;
        self.registry.set_step_count(self.controller.len());
        Ok(())
    }

    // ── Layout ──────────────────────────────────────────────────────────

    /// Open a layout pass. Anchors from earlier passes are discarded.
    pub fn begin_layout_pass(&mut self) -> u64 {
        self.registry.sync_tree(&self.tree);
        self.registry.begin_layout_pass()
    }

    /// Record the local bounds of step `index`'s target, measured inside
    /// the container `parent`.
    pub fn measure(
        &mut self,
        index: usize,
        local: Rect,
        parent: NodeId,
    ) -> Result<AnchorGeometry> {
        Ok(self
            .registry
            .register_in_tree(index, local, &self.tree, parent)?)
    }

    /// Record local bounds with an explicit offset chain.
    pub fn measure_with_chain(
        &mut self,
        index: usize,
        local: Rect,
        chain: &OffsetChain,
    ) -> Result<AnchorGeometry> {
        Ok(self.registry.register(index, local, chain)?)
    }

    /// Close the layout pass.
    ///
    /// Auto-starts the sequence on the first call when configured, then
    /// builds or refreshes the overlay for the current step.
    pub fn layout_settled(&mut self) -> Result<Option<Transition>> {
        self.registry.settle();
        let mut started = None;
        if self.config.auto_start && !self.auto_started && !self.controller.is_empty() {
            self.auto_started = true;
            if self.controller.state() == SequenceState::Idle {
                started = Some(self.start()?);
            }
        }
        if started.is_none() && self.controller.state().is_running() {
            self.rebuild()?;
        }
        Ok(started)
    }

    /// Change the drawable area and re-place the current overlay.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<()> {
        let config = self.config.clone().viewport(Size::new(width, height));
        config.validate()?;
        self.config = config;
        self.renderer.set_viewport(Rect::from_size(width, height));
        if self.controller.state().is_running() {
            self.rebuild()?;
        }
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Transition> {
        let transition = self.controller.start()?;
        self.apply(transition)?;
        Ok(transition)
    }

    pub fn next(&mut self) -> Result<Option<Transition>> {
        let transition = self.controller.next();
        self.apply_opt(transition)
    }

    pub fn previous(&mut self) -> Result<Option<Transition>> {
        let transition = self.controller.previous();
        self.apply_opt(transition)
    }

    /// End the run. The overlay and its fade are removed synchronously.
    pub fn dismiss(&mut self) -> Result<Option<Transition>> {
        let transition = self.controller.dismiss();
        self.apply_opt(transition)
    }

    pub fn go_to(&mut self, index: usize) -> Result<Transition> {
        let transition = self.controller.go_to(index)?;
        self.apply(transition)?;
        Ok(transition)
    }

    /// Apply every command posted through the handle, in order.
    ///
    /// Commands that are invalid in the current state are skipped. When
    /// applying a transition fails, the commands after it go back on the
    /// queue ahead of anything posted meanwhile, and the error is returned.
    pub fn process_commands(&mut self) -> Result<Vec<Transition>> {
        let mut applied = Vec::new();
        // Commands posted while applying are picked up by the outer loop.
        loop {
            let commands = self.handle.take_commands();
            if commands.is_empty() {
                break;
            }
            let mut commands = commands.into_iter();
            while let Some(command) = commands.next() {
                let transition = match command {
                    Command::Next => self.controller.next(),
                    Command::Previous => self.controller.previous(),
                    Command::Dismiss => self.controller.dismiss(),
                    Command::GoTo(index) => match self.controller.go_to(index) {
                        Ok(t) => Some(t),
                        Err(_err) => {
                            #[cfg(feature = "tracing")]
                            tracing::warn!(target: "spotlight", error = %_err, "ignored go_to command");
                            None
                        }
                    },
                };
                if let Some(transition) = transition {
                    if let Err(err) = self.apply(transition) {
                        let posted_meanwhile = self.handle.take_commands();
                        for command in commands.chain(posted_meanwhile) {
                            self.handle.post(command);
                        }
                        return Err(err);
                    }
                    applied.push(transition);
                }
            }
        }
        Ok(applied)
    }

    // ── Interaction ─────────────────────────────────────────────────────

    /// Classify a tap without acting on it.
    pub fn hit_test(&self, point: Point) -> TapTarget {
        match self.renderer.frame() {
            None => TapTarget::Nothing,
            Some(frame) if frame.dialog.contains(point) => TapTarget::Dialog,
            Some(frame) if frame.hole.contains(point) => TapTarget::Hole,
            Some(_) => TapTarget::Backdrop,
        }
    }

    /// Route a tap.
    ///
    /// A tap in the hole advances when `advance_on_hole_tap` is set; a tap
    /// on the backdrop dismisses when `dismiss_on_backdrop_tap` is set.
    pub fn tap(&mut self, point: Point) -> Result<Vec<Transition>> {
        match self.hit_test(point) {
            TapTarget::Hole if self.config.advance_on_hole_tap => self.handle.next(),
            TapTarget::Backdrop if self.config.dismiss_on_backdrop_tap => self.handle.dismiss(),
            _ => {}
        }
        self.process_commands()
    }

    /// Press the current dialog's action button, if it has one.
    pub fn press_action(&mut self) -> Result<Vec<Transition>> {
        if self.renderer.is_showing()
            && let Some(action) = self.content.as_ref().and_then(|c| c.action.as_ref())
        {
            action.press();
        }
        self.process_commands()
    }

    // ── Time & output ───────────────────────────────────────────────────

    /// Advance the backdrop fade. Returns `true` if its phase changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.renderer.tick(delta)
    }

    pub fn is_animating(&self) -> bool {
        self.renderer.is_animating()
    }

    /// Current backdrop opacity, including a fade-out after the last step.
    pub fn backdrop_alpha(&self) -> f32 {
        self.renderer.backdrop_alpha()
    }

    /// The step is running but its geometry has not been measured in the
    /// current pass.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The composed overlay (anchor, hole, full dialog placement).
    pub fn overlay(&self) -> Option<&Overlay> {
        self.renderer.current()
    }

    /// Dialog content of the shown step.
    pub fn content(&self) -> Option<&DialogContent> {
        self.content.as_ref()
    }

    /// What to draw, if an overlay is shown.
    pub fn frame(&self) -> Option<ShowcaseFrame<'_>> {
        let overlay = self.renderer.frame()?;
        let content = self.content.as_ref()?;
        Some(ShowcaseFrame { overlay, content })
    }

    pub fn drain_events(&mut self) -> Vec<SequenceEvent> {
        self.controller.drain_events()
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn apply_opt(&mut self, transition: Option<Transition>) -> Result<Option<Transition>> {
        if let Some(t) = transition {
            self.apply(t)?;
        }
        Ok(transition)
    }

    fn apply(&mut self, transition: Transition) -> Result<()> {
        self.content = None;
        match transition.to {
            SequenceState::Running(_) => {
                self.renderer.teardown();
                self.pending = true;
                self.rebuild()?;
            }
            SequenceState::Dismissed => {
                self.renderer.cancel();
                self.pending = false;
            }
            SequenceState::Finished | SequenceState::Idle => {
                self.renderer.teardown();
                self.pending = false;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "spotlight",
            from = ?transition.from,
            to = ?transition.to,
            reason = ?transition.reason,
            run = transition.run,
            pending = self.pending,
            "showcase transition"
        );
        Ok(())
    }

    /// Build the overlay for the running step from fresh geometry, or mark
    /// it pending.
    fn rebuild(&mut self) -> Result<bool> {
        let Some(index) = self.controller.state().current_index() else {
            return Ok(false);
        };
        self.registry.sync_tree(&self.tree);
        let (Some(geometry), Some(step)) =
            (self.registry.resolve(index), self.controller.step(index))
        else {
            if self.renderer.is_showing() {
                self.renderer.teardown();
            }
            self.content = None;
            self.pending = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "spotlight",
                index,
                generation = self.registry.generation(),
                "anchor not fresh; overlay pending"
            );
            return Ok(false);
        };

        let content = step.render_content(&self.handle);
        let target = RenderTarget::new(self.controller.run(), index);
        self.renderer
            .show(target, geometry.bounds(), step.style(), content.size)?;
        self.content = Some(content);
        self.pending = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_core::animation::{AnimationDuration, FadePhase};
    use spotlight_core::geometry::Sides;
    use spotlight_layout::Contribution;
    use spotlight_overlay::HighlightShape;

    fn showcase(auto_start: bool) -> (Showcase, NodeId) {
        let mut tree = LayoutTree::default();
        let content = tree
            .push(tree.root(), Contribution::padded(Sides::all(16.0)))
            .unwrap();
        let config = ShowcaseConfig::new()
            .auto_start(auto_start)
            .advance_on_hole_tap(true);
        let mut showcase = Showcase::with_tree(config, tree).unwrap();
        for i in 0..2 {
            let config = showcase
                .step_config()
                .shape(HighlightShape::rectangular(8.0))
                .animation_duration(AnimationDuration::FAST);
            let command = if i == 0 { Command::Next } else { Command::Dismiss };
            showcase
                .register_step(
                    i,
                    config,
                    Box::new(move |handle| {
                        DialogContent::new("body").action(handle.action("Got it!", command))
                    }),
                )
                .unwrap();
        }
        (showcase, content)
    }

    fn layout(showcase: &mut Showcase, parent: NodeId) -> Option<Transition> {
        showcase.begin_layout_pass();
        showcase
            .measure(0, Rect::new(0.0, 0.0, 200.0, 80.0), parent)
            .unwrap();
        showcase
            .measure(1, Rect::new(0.0, 100.0, 120.0, 48.0), parent)
            .unwrap();
        showcase.layout_settled().unwrap()
    }

    #[test]
    fn auto_start_builds_first_overlay() {
        let (mut showcase, parent) = showcase(true);
        let started = layout(&mut showcase, parent).unwrap();
        assert_eq!(started.to, SequenceState::Running(0));
        let frame = showcase.frame().unwrap();
        assert_eq!(frame.overlay.hole.bounds(), Rect::new(16.0, 16.0, 200.0, 80.0));
        assert_eq!(frame.content.action.as_ref().unwrap().label(), "Got it!");

        // A second settled pass does not restart.
        assert!(layout(&mut showcase, parent).is_none());
        assert_eq!(showcase.state(), SequenceState::Running(0));
    }

    #[test]
    fn start_before_layout_is_pending() {
        let (mut showcase, parent) = showcase(false);
        showcase.start().unwrap();
        assert!(showcase.is_pending());
        assert!(showcase.frame().is_none());
        layout(&mut showcase, parent);
        assert!(!showcase.is_pending());
        assert!(showcase.frame().is_some());
    }

    #[test]
    fn action_walks_the_sequence() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        let transitions = showcase.press_action().unwrap();
        assert_eq!(transitions.len(), 1);
        assert_eq!(showcase.state(), SequenceState::Running(1));
        let frame = showcase.frame().unwrap();
        assert_eq!(frame.overlay.target.step, 1);
        assert_eq!(frame.overlay.hole.bounds(), Rect::new(16.0, 116.0, 120.0, 48.0));

        showcase.tick(Duration::from_millis(300));
        assert!(showcase.backdrop_alpha() > 0.0);
        showcase.press_action().unwrap();
        assert_eq!(showcase.state(), SequenceState::Dismissed);
        assert!(showcase.frame().is_none());
        assert_eq!(showcase.backdrop_alpha(), 0.0);
        assert!(showcase.press_action().unwrap().is_empty());
    }

    #[test]
    fn tap_routing() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        assert_eq!(showcase.hit_test(Point::new(100.0, 50.0)), TapTarget::Hole);
        assert_eq!(showcase.hit_test(Point::new(350.0, 630.0)), TapTarget::Backdrop);
        assert!(showcase.tap(Point::new(350.0, 630.0)).unwrap().is_empty());
        let moved = showcase.tap(Point::new(100.0, 50.0)).unwrap();
        assert_eq!(moved[0].to, SequenceState::Running(1));
    }

    #[test]
    fn finishing_fades_out() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        showcase.next().unwrap();
        showcase.tick(Duration::from_millis(300));
        let finished = showcase.next().unwrap().unwrap();
        assert_eq!(finished.to, SequenceState::Finished);
        assert!(showcase.frame().is_none());
        assert_eq!(showcase.renderer.phase(), FadePhase::FadingOut);
    }

    #[test]
    fn tree_change_defers_until_next_settle() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        showcase
            .tree_mut()
            .set_contribution(parent, Contribution::padded(Sides::all(24.0)))
            .unwrap();
        showcase.go_to(1).unwrap();
        assert!(showcase.is_pending());
        assert!(showcase.frame().is_none());

        layout(&mut showcase, parent);
        let frame = showcase.frame().unwrap();
        assert_eq!(frame.overlay.hole.bounds(), Rect::new(24.0, 124.0, 120.0, 48.0));
    }

    #[test]
    fn invalid_go_to_is_reported_and_ignored_as_command() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        assert!(showcase.go_to(9).is_err());
        showcase.handle().go_to(9);
        assert!(showcase.process_commands().unwrap().is_empty());
        assert_eq!(showcase.state(), SequenceState::Running(0));
    }

    #[test]
    fn failed_transition_keeps_later_commands_queued() {
        let mut tree = LayoutTree::default();
        let root = tree.root();
        let mut showcase = Showcase::with_tree(ShowcaseConfig::default(), tree).unwrap();
        showcase
            .register_step(0, showcase.step_config(), Box::new(|_| DialogContent::new("ok")))
            .unwrap();
        showcase
            .register_step(
                1,
                showcase.step_config(),
                Box::new(|_| DialogContent::new("broken").size(Size::new(-1.0, 40.0))),
            )
            .unwrap();
        showcase.begin_layout_pass();
        showcase.measure(0, Rect::new(0.0, 0.0, 100.0, 40.0), root).unwrap();
        showcase.measure(1, Rect::new(0.0, 60.0, 100.0, 40.0), root).unwrap();
        showcase.layout_settled().unwrap();
        assert_eq!(showcase.state(), SequenceState::Running(0));

        let handle = showcase.handle();
        handle.next();
        handle.previous();
        handle.dismiss();
        assert!(showcase.process_commands().is_err());
        assert_eq!(showcase.state(), SequenceState::Running(1));
        assert_eq!(
            handle.take_commands(),
            vec![Command::Previous, Command::Dismiss]
        );

        handle.previous();
        let applied = showcase.process_commands().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(showcase.state(), SequenceState::Running(0));
        assert!(showcase.frame().is_some());
    }

    #[test]
    fn hit_test_on_fully_rounded_hole() {
        let tree = LayoutTree::default();
        let root = tree.root();
        let mut showcase = Showcase::with_tree(ShowcaseConfig::new(), tree).unwrap();
        let pill = showcase
            .step_config()
            .shape(HighlightShape::rectangular(1000.0));
        showcase
            .register_step(0, pill, Box::new(|_| DialogContent::new("pill")))
            .unwrap();
        showcase.begin_layout_pass();
        showcase
            .measure(0, Rect::new(0.03, 0.03, 8.14, 8.14), root)
            .unwrap();
        showcase.layout_settled().unwrap();

        assert_eq!(showcase.hit_test(Point::new(1.0, 4.0)), TapTarget::Hole);
        assert_eq!(showcase.hit_test(Point::new(0.2, 0.2)), TapTarget::Backdrop);
        assert!(showcase.tap(Point::new(1.0, 4.0)).unwrap().is_empty());
    }

    #[test]
    fn viewport_change_replaces_dialog() {
        let (mut showcase, parent) = showcase(true);
        layout(&mut showcase, parent);
        showcase.set_viewport(220.0, 300.0).unwrap();
        let dialog = showcase.frame().unwrap().overlay.dialog;
        assert!(Rect::from_size(220.0, 300.0).contains_rect(&dialog));

        assert!(showcase.set_viewport(0.0, 300.0).is_err());
        assert_eq!(showcase.config().viewport, Size::new(220.0, 300.0));
    }
}
