#![forbid(unsafe_code)]

//! Command-line walkthrough of a nested, padded screen.
//!
//! Builds a card and a button four containers deep, runs the two-step
//! showcase to completion, and prints where each highlight landed as text
//! with ASCII frames or as JSON.

pub mod canvas;
pub mod cli;
pub mod error;
pub mod logging;
pub mod scenario;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
