#![forbid(unsafe_code)]

//! Capability handle given to dialog content renderers.
//!
//! A renderer never touches the controller directly. It receives a
//! [`ShowcaseHandle`] and wires dialog actions to it; pressing an action
//! posts a [`Command`] into a queue that the owner drains and applies
//! between frames.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Navigation request posted by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Command {
    Next,
    Previous,
    Dismiss,
    GoTo(usize),
}

/// Shared, single-threaded command queue.
#[derive(Clone, Default)]
pub struct ShowcaseHandle {
    queue: Rc<RefCell<VecDeque<Command>>>,
}

impl fmt::Debug for ShowcaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseHandle")
            .field("pending", &self.pending())
            .finish()
    }
}

impl ShowcaseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next step (or finish on the last one).
    pub fn next(&self) {
        self.post(Command::Next);
    }

    /// Go back one step.
    pub fn previous(&self) {
        self.post(Command::Previous);
    }

    /// End the sequence early.
    pub fn dismiss(&self) {
        self.post(Command::Dismiss);
    }

    /// Jump to `index`.
    pub fn go_to(&self, index: usize) {
        self.post(Command::GoTo(index));
    }

    /// Enqueue a command.
    pub fn post(&self, command: Command) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Number of commands waiting.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Remove and return all queued commands in posting order.
    pub fn take_commands(&self) -> Vec<Command> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Build a dialog action that posts `command` when pressed.
    pub fn action(&self, label: impl Into<String>, command: Command) -> DialogAction {
        DialogAction {
            label: label.into(),
            command,
            handle: self.clone(),
        }
    }

    /// Whether two handles share one queue.
    pub fn same_queue(&self, other: &ShowcaseHandle) -> bool {
        Rc::ptr_eq(&self.queue, &other.queue)
    }
}

/// A labeled button in a dialog.
#[derive(Debug, Clone)]
pub struct DialogAction {
    label: String,
    command: Command,
    handle: ShowcaseHandle,
}

impl DialogAction {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Post the bound command.
    pub fn press(&self) {
        self.handle.post(self.command);
    }
}
