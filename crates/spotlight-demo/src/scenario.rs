//! The padded walkthrough screen.
//!
//! ```text
//! window
//! └─ scaffold     top-bar inset
//!    └─ screen    padding 16
//!       └─ surface  padding 8
//!          └─ column  padding 16, items spaced 16
//!             ├─ card    (step 0, rounded rect r=8, "Got it!" → next)
//!             └─ button  (step 1, circle +8,        "Got it!" → dismiss)
//! ```

use serde::Serialize;
use spotlight::{
    Command, Contribution, DialogContent, DialogPlacement, HighlightShape, LayoutTree, NodeId,
    Offset, Outline, Rect, SequenceEvent, SequenceState, Showcase, ShowcaseConfig, Sides, Size,
};

use crate::canvas::Canvas;
use crate::error::{DemoError, Result};

pub const SCREEN_PADDING: f32 = 16.0;
pub const SURFACE_PADDING: f32 = 8.0;
pub const CONTENT_PADDING: f32 = 16.0;
pub const ITEM_SPACING: f32 = 16.0;
pub const CARD_HEIGHT: f32 = 120.0;
pub const BUTTON_SIZE: Size = Size::new(120.0, 48.0);

const CARD: usize = 0;
const BUTTON: usize = 1;

/// One step as it was shown.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub index: usize,
    pub label: String,
    /// Bounds inside the column.
    pub local: Rect,
    /// Bounds after walking every ancestor.
    pub anchor: Rect,
    /// Bounds if only the immediate parent's contribution were applied.
    pub naive_anchor: Rect,
    /// How far the naive placement is off.
    pub naive_error: Offset,
    pub hole: Outline,
    pub dialog: DialogPlacement,
    pub backdrop_alpha: f32,
    pub title: Option<String>,
    pub body: String,
    pub action_label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub canvas: Vec<String>,
}

/// Result of running the sequence to completion.
#[derive(Debug, Clone, Serialize)]
pub struct Walkthrough {
    pub viewport: Size,
    pub top_bar: f32,
    pub steps: Vec<StepSnapshot>,
    pub events: Vec<SequenceEvent>,
    pub final_state: SequenceState,
}

/// The screen plus its showcase.
#[derive(Debug)]
pub struct PaddedScreen {
    showcase: Showcase,
    scaffold: NodeId,
    column: NodeId,
    top_bar: f32,
    card: Rect,
    button: Rect,
}

impl PaddedScreen {
    /// Build the container tree and register both steps. Step styles start
    /// from `config.defaults`; only the shapes are fixed.
    pub fn new(config: ShowcaseConfig, top_bar: f32) -> Result<Self> {
        if !(top_bar.is_finite() && top_bar >= 0.0) {
            return Err(DemoError::invalid(format!(
                "top bar height must be finite and non-negative, got {top_bar}"
            )));
        }
        let inset = 2.0 * (SCREEN_PADDING + SURFACE_PADDING + CONTENT_PADDING);
        let column_width = config.viewport.width - inset;
        if column_width <= 0.0 {
            return Err(DemoError::invalid(format!(
                "viewport width {} leaves no room inside {inset} of padding",
                config.viewport.width
            )));
        }

        let mut tree = LayoutTree::default();
        let scaffold = tree
            .push_labeled(tree.root(), "scaffold", Contribution::inset_by(Sides::top(top_bar)))
            .map_err(spotlight::Error::from)?;
        let screen = tree
            .push_labeled(scaffold, "screen", Contribution::padded(Sides::all(SCREEN_PADDING)))
            .map_err(spotlight::Error::from)?;
        let surface = tree
            .push_labeled(screen, "surface", Contribution::padded(Sides::all(SURFACE_PADDING)))
            .map_err(spotlight::Error::from)?;
        let column = tree
            .push_labeled(surface, "column", Contribution::padded(Sides::all(CONTENT_PADDING)))
            .map_err(spotlight::Error::from)?;

        let mut showcase = Showcase::with_tree(config, tree)?;

        let card_step = showcase
            .step_config()
            .label("card")
            .shape(HighlightShape::rectangular(8.0));
        showcase.register_step(
            CARD,
            card_step,
            Box::new(|handle| {
                DialogContent::new("Four layers of padding sit above this card.")
                    .title("Card")
                    .action(handle.action("Got it!", Command::Next))
            }),
        )?;

        let button_step = showcase
            .step_config()
            .label("button")
            .shape(HighlightShape::circular(8.0));
        showcase.register_step(
            BUTTON,
            button_step,
            Box::new(|handle| {
                DialogContent::new("The circle is centered on the button, wherever it lands.")
                    .title("Button")
                    .action(handle.action("Got it!", Command::Dismiss))
            }),
        )?;

        let card = Rect::new(0.0, 0.0, column_width, CARD_HEIGHT);
        let button = Rect::new(
            0.0,
            CARD_HEIGHT + ITEM_SPACING,
            BUTTON_SIZE.width,
            BUTTON_SIZE.height,
        );

        Ok(Self {
            showcase,
            scaffold,
            column,
            top_bar,
            card,
            button,
        })
    }

    pub fn showcase(&self) -> &Showcase {
        &self.showcase
    }

    pub fn showcase_mut(&mut self) -> &mut Showcase {
        &mut self.showcase
    }

    /// Change the top bar and re-measure.
    pub fn set_top_bar(&mut self, top_bar: f32) -> Result<()> {
        self.showcase
            .tree_mut()
            .set_contribution(self.scaffold, Contribution::inset_by(Sides::top(top_bar)))
            .map_err(spotlight::Error::from)?;
        self.top_bar = top_bar;
        self.layout()
    }

    /// One layout pass: measure both targets and settle.
    pub fn layout(&mut self) -> Result<()> {
        self.showcase.begin_layout_pass();
        self.showcase.measure(CARD, self.card, self.column)?;
        self.showcase.measure(BUTTON, self.button, self.column)?;
        self.showcase.layout_settled()?;
        Ok(())
    }

    fn local(&self, index: usize) -> Rect {
        if index == CARD { self.card } else { self.button }
    }

    /// Where `index` would land if only the column's own padding counted.
    pub fn naive_anchor(&self, index: usize) -> Result<Rect> {
        let chain = self
            .showcase
            .tree()
            .chain(self.column)
            .map_err(spotlight::Error::from)?;
        let innermost = chain.decompose().last().copied().unwrap_or(Offset::ZERO);
        Ok(self.local(index).translate(innermost))
    }

    /// Lay out, start if needed, and press every dialog's action until the
    /// sequence ends. `cell` enables ASCII frames.
    pub fn run(mut self, cell: Option<Size>) -> Result<Walkthrough> {
        self.layout()?;
        if self.showcase.state() == SequenceState::Idle {
            self.showcase.start()?;
        }

        let mut steps = Vec::new();
        let limit = self.showcase.controller().len() * 2 + 1;
        for _ in 0..limit {
            let Some(index) = self.showcase.state().current_index() else {
                break;
            };
            if let Some(step) = self.showcase.controller().step(index) {
                let enter = step.style().animation_duration.enter;
                self.showcase.tick(enter);
            }
            steps.push(self.snapshot(index, cell)?);
            tracing::info!(target: "spotlight_demo", index, "step captured");

            if self.showcase.press_action()?.is_empty() {
                self.showcase.next()?;
            }
        }

        Ok(Walkthrough {
            viewport: self.showcase.config().viewport,
            top_bar: self.top_bar,
            steps,
            events: self.showcase.drain_events(),
            final_state: self.showcase.state(),
        })
    }

    fn snapshot(&self, index: usize, cell: Option<Size>) -> Result<StepSnapshot> {
        let frame = self
            .showcase
            .frame()
            .ok_or_else(|| DemoError::Scenario(format!("step {index} has no overlay")))?;
        let overlay = self
            .showcase
            .overlay()
            .ok_or_else(|| DemoError::Scenario(format!("step {index} has no overlay")))?;
        let label = self
            .showcase
            .controller()
            .step(index)
            .map(|s| s.name())
            .unwrap_or_default();
        let naive_anchor = self.naive_anchor(index)?;
        let canvas = match cell {
            Some(cell) => {
                let mut canvas = Canvas::new(self.showcase.config().viewport, cell);
                canvas.draw(&frame.overlay, frame.content);
                canvas.lines()
            }
            None => Vec::new(),
        };

        Ok(StepSnapshot {
            index,
            label,
            local: self.local(index),
            anchor: overlay.anchor,
            naive_anchor,
            naive_error: Offset::new(
                naive_anchor.x - overlay.anchor.x,
                naive_anchor.y - overlay.anchor.y,
            ),
            hole: overlay.hole,
            dialog: overlay.dialog,
            backdrop_alpha: frame.overlay.backdrop_alpha,
            title: frame.content.title.clone(),
            body: frame.content.body.clone(),
            action_label: frame.content.action.as_ref().map(|a| a.label().to_string()),
            canvas,
        })
    }
}
