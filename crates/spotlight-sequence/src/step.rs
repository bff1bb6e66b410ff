#![forbid(unsafe_code)]

//! Step descriptors.

use std::fmt;

use spotlight_core::animation::{AnimationDuration, BackgroundAlpha};
use spotlight_core::geometry::Size;
use spotlight_overlay::{Alignment, HighlightShape, OverlayError, OverlayStyle, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::handle::{DialogAction, ShowcaseHandle};

/// Default dialog size when content does not specify one.
pub const DEFAULT_DIALOG_SIZE: Size = Size::new(240.0, 96.0);

/// Visual configuration of a step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepConfig {
    /// Optional name used in logs and reports.
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: OverlayStyle,
}

impl StepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: HighlightShape) -> Self {
        self.style.shape = shape;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.style.alignment = alignment;
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.style.position = position;
        self
    }

    #[must_use]
    pub fn animation_duration(mut self, duration: AnimationDuration) -> Self {
        self.style.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn background_alpha(mut self, alpha: BackgroundAlpha) -> Self {
        self.style.background_alpha = alpha;
        self
    }

    #[must_use]
    pub fn dialog_margin(mut self, margin: f32) -> Self {
        self.style.dialog_margin = margin;
        self
    }

    pub fn validate(&self) -> Result<(), OverlayError> {
        self.style.validate()
    }
}

/// What a step's dialog shows.
#[derive(Debug, Clone)]
pub struct DialogContent {
    pub title: Option<String>,
    pub body: String,
    pub action: Option<DialogAction>,
    /// Requested dialog size before viewport clamping.
    pub size: Size,
}

impl DialogContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            action: None,
            size: DEFAULT_DIALOG_SIZE,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: DialogAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

/// Produces dialog content; receives the handle to bind actions to.
pub type ContentRenderer = Box<dyn Fn(&ShowcaseHandle) -> DialogContent>;

/// A registered, validated step.
pub struct Step {
    index: usize,
    config: StepConfig,
    content: ContentRenderer,
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("index", &self.index)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Step {
    pub(crate) fn new(index: usize, config: StepConfig, content: ContentRenderer) -> Self {
        Self {
            index,
            config,
            content,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.config.style
    }

    /// Label, falling back to `step <index>`.
    pub fn name(&self) -> String {
        self.config
            .label
            .clone()
            .unwrap_or_else(|| format!("step {}", self.index))
    }

    /// Run the content renderer.
    pub fn render_content(&self, handle: &ShowcaseHandle) -> DialogContent {
        (self.content)(handle)
    }
}
