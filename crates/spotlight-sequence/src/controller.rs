#![forbid(unsafe_code)]

//! Sequence state machine.
//!
//! ```text
//! Idle ──start──▶ Running(0) ──next──▶ Running(1) ─ … ─next──▶ Finished
//!                    │  ▲                  │
//!                    │  └────previous──────┘
//!                    └──dismiss──▶ Dismissed
//! ```
//!
//! `Finished` and `Dismissed` are terminal for the current run; `start()`
//! from either begins a fresh run with a new run number. Every state change
//! returns a [`Transition`] and records a [`SequenceEvent`].

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SequenceError;
use crate::step::{ContentRenderer, Step, StepConfig};

/// Where the sequence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SequenceState {
    #[default]
    Idle,
    Running(usize),
    Finished,
    Dismissed,
}

impl SequenceState {
    /// Active step index.
    pub fn current_index(self) -> Option<usize> {
        match self {
            Self::Running(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// `Finished` or `Dismissed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Dismissed)
    }
}

/// Why a transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TransitionReason {
    Start,
    Next,
    Previous,
    Dismiss,
    Jump,
}

/// One state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transition {
    pub from: SequenceState,
    pub to: SequenceState,
    pub reason: TransitionReason,
    /// Run number, starting at 1 for the first `start()`.
    pub run: u64,
}

/// Observer-facing record of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "kebab-case"))]
pub enum SequenceEvent {
    StepChanged {
        from: Option<usize>,
        to: usize,
        reason: TransitionReason,
        run: u64,
    },
    Finished {
        last_step: usize,
        run: u64,
    },
    Dismissed {
        at: usize,
        run: u64,
    },
}

impl From<Transition> for SequenceEvent {
    fn from(t: Transition) -> Self {
        match (t.from.current_index(), t.to) {
            (from, SequenceState::Running(to)) => Self::StepChanged {
                from,
                to,
                reason: t.reason,
                run: t.run,
            },
            (Some(at), SequenceState::Dismissed) => Self::Dismissed { at, run: t.run },
            (from, _) => Self::Finished {
                last_step: from.unwrap_or_default(),
                run: t.run,
            },
        }
    }
}

/// Ordered steps plus the current [`SequenceState`].
#[derive(Debug, Default)]
pub struct SequenceController {
    steps: BTreeMap<usize, Step>,
    state: SequenceState,
    run: u64,
    events: Vec<SequenceEvent>,
}

impl SequenceController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the step at `index`.
    ///
    /// Fails on a duplicate index, an invalid config, or while a run is in
    /// progress.
    pub fn register(
        &mut self,
        index: usize,
        config: StepConfig,
        content: ContentRenderer,
    ) -> Result<(), SequenceError> {
        if self.state.is_running() {
            return Err(SequenceError::SequenceRunning);
        }
        if self.steps.contains_key(&index) {
            return Err(SequenceError::DuplicateIndex(index));
        }
        config
            .validate()
            .map_err(|source| SequenceError::InvalidConfig { index, source })?;
        self.steps.insert(index, Step::new(index, config, content));
        Ok(())
    }

    /// Remove every step. Not allowed while running.
    pub fn clear(&mut self) -> Result<(), SequenceError> {
        if self.state.is_running() {
            return Err(SequenceError::SequenceRunning);
        }
        self.steps.clear();
        Ok(())
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Current run number (0 before the first start).
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(&index)
    }

    /// The step being shown, if running.
    pub fn current_step(&self) -> Option<&Step> {
        self.state.current_index().and_then(|i| self.steps.get(&i))
    }

    /// Steps in index order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    /// Begin a run at step 0.
    pub fn start(&mut self) -> Result<Transition, SequenceError> {
        if let SequenceState::Running(index) = self.state {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "spotlight::sequence", index, "start() while already running");
            return Err(SequenceError::AlreadyRunning { index });
        }
        if self.steps.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "spotlight::sequence", "start() with no registered steps");
            return Err(SequenceError::EmptySequence);
        }
        if let Some(index) = self.first_gap() {
            return Err(SequenceError::MissingStep { index });
        }
        self.run += 1;
        Ok(self.transition(SequenceState::Running(0), TransitionReason::Start))
    }

    /// Advance, finishing after the last step. No-op unless running.
    pub fn next(&mut self) -> Option<Transition> {
        let index = self.state.current_index()?;
        let to = if index + 1 < self.steps.len() {
            SequenceState::Running(index + 1)
        } else {
            SequenceState::Finished
        };
        Some(self.transition(to, TransitionReason::Next))
    }

    /// Go back one step. No-op at step 0 or unless running.
    pub fn previous(&mut self) -> Option<Transition> {
        let index = self.state.current_index()?;
        if index == 0 {
            return None;
        }
        Some(self.transition(
            SequenceState::Running(index - 1),
            TransitionReason::Previous,
        ))
    }

    /// End the run early. No-op unless running.
    pub fn dismiss(&mut self) -> Option<Transition> {
        self.state.current_index()?;
        Some(self.transition(SequenceState::Dismissed, TransitionReason::Dismiss))
    }

    /// Jump to `index` while running.
    pub fn go_to(&mut self, index: usize) -> Result<Transition, SequenceError> {
        if !self.state.is_running() {
            return Err(SequenceError::NotRunning);
        }
        if index >= self.steps.len() {
            return Err(SequenceError::InvalidIndex {
                index,
                count: self.steps.len(),
            });
        }
        Ok(self.transition(SequenceState::Running(index), TransitionReason::Jump))
    }

    /// Take recorded events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SequenceEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, to: SequenceState, reason: TransitionReason) -> Transition {
        let transition = Transition {
            from: self.state,
            to,
            reason,
            run: self.run,
        };
        self.state = to;
        self.events.push(transition.into());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "spotlight::sequence",
            from = ?transition.from,
            to = ?transition.to,
            ?reason,
            run = self.run,
            "sequence transition"
        );
        transition
    }

    /// Lowest index in `0..len` with no registered step.
    fn first_gap(&self) -> Option<usize> {
        self.steps
            .keys()
            .enumerate()
            .find(|(expected, actual)| expected != *actual)
            .map(|(expected, _)| expected)
    }
}
