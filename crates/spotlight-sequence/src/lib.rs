#![forbid(unsafe_code)]

//! Ordered highlight steps and the state machine that walks them.
//!
//! - [`step`]: [`StepConfig`], [`DialogContent`], and registered [`Step`]s.
//! - [`handle`]: the [`ShowcaseHandle`] capability content renderers use to
//!   request navigation.
//! - [`controller`]: the [`SequenceController`] state machine.

pub mod controller;
pub mod handle;
pub mod step;

pub use controller::{
    SequenceController, SequenceEvent, SequenceState, Transition, TransitionReason,
};
pub use handle::{Command, DialogAction, ShowcaseHandle};
pub use step::{ContentRenderer, DEFAULT_DIALOG_SIZE, DialogContent, Step, StepConfig};

use spotlight_overlay::OverlayError;

/// Sequence registration and navigation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequenceError {
    /// Target index outside `0..count`.
    #[error("step index {index} out of range (step count {count})")]
    InvalidIndex { index: usize, count: usize },

    /// `start()` with nothing registered.
    #[error("no steps registered")]
    EmptySequence,

    /// `start()` during a run.
    #[error("sequence already running at step {index}")]
    AlreadyRunning { index: usize },

    /// Navigation that needs a running sequence.
    #[error("sequence is not running")]
    NotRunning,

    /// A step with this index already exists.
    #[error("step {0} is already registered")]
    DuplicateIndex(usize),

    /// Registered indices are not dense.
    #[error("step {index} is missing; indices must be 0..N")]
    MissingStep { index: usize },

    /// Steps cannot change during a run.
    #[error("cannot modify steps while the sequence is running")]
    SequenceRunning,

    /// The step's visual configuration is malformed.
    #[error("invalid configuration for step {index}: {source}")]
    InvalidConfig {
        index: usize,
        #[source]
        source: OverlayError,
    },
}
