use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use spotlight::{ShowcaseConfig, Size};

use crate::error::{DemoError, Result};
use crate::logging;
use crate::scenario::{PaddedScreen, Walkthrough};

/// Largest ASCII frame, in cells per side.
pub const MAX_CANVAS_CELLS: f32 = 1000.0;

#[derive(Debug, Parser)]
#[command(
    name = "spotlight-demo",
    about = "Walk a two-step showcase through a screen nested four padding layers deep",
    version
)]
pub struct Cli {
    /// Viewport width (overrides the config file).
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height (overrides the config file).
    #[arg(long)]
    pub height: Option<f32>,

    /// Height of the top bar above the screen.
    #[arg(long = "top-bar", default_value_t = 64.0)]
    pub top_bar: f32,

    /// Showcase config (`.json` is read as JSON, anything else as TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the walkthrough as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also report where a parent-only offset would have put each anchor.
    #[arg(long)]
    pub naive: bool,

    /// Pixels per character column.
    #[arg(long = "cell-width", default_value_t = 8.0)]
    pub cell_width: f32,

    /// Pixels per character row.
    #[arg(long = "cell-height", default_value_t = 16.0)]
    pub cell_height: f32,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    if cli.log_json {
        logging::init_json();
    } else {
        logging::init(&cli.log_level);
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(&cli)?;
    let cell = Size::new(cli.cell_width, cli.cell_height);
    if !(cell.width > 0.0 && cell.height > 0.0) {
        return Err(DemoError::invalid(format!(
            "cell size must be positive, got {}x{}",
            cell.width, cell.height
        )));
    }
    if !cli.json {
        let viewport = config.viewport;
        let cols = (viewport.width / cell.width).ceil();
        let rows = (viewport.height / cell.height).ceil();
        if !(cols <= MAX_CANVAS_CELLS && rows <= MAX_CANVAS_CELLS) {
            return Err(DemoError::invalid(format!(
                "a {}x{} cell grid over {}x{} exceeds {MAX_CANVAS_CELLS} cells per side",
                cell.width, cell.height, viewport.width, viewport.height
            )));
        }
    }

    let screen = PaddedScreen::new(config, cli.top_bar)?;
    let walkthrough = screen.run(if cli.json { None } else { Some(cell) })?;

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &walkthrough)?;
        writeln!(out)?;
    } else {
        write_report(&walkthrough, cli.naive, out)?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ShowcaseConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ShowcaseConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport.width = width;
    }
    if let Some(height) = cli.height {
        config.viewport.height = height;
    }
    if let Err(err) = config.validate() {
        return Err(DemoError::invalid(err.to_string()));
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<ShowcaseConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        ShowcaseConfig::from_json_file(path)
    } else {
        ShowcaseConfig::from_toml_file(path)
    };
    Ok(config.map_err(spotlight::Error::from)?)
}

fn write_report(walkthrough: &Walkthrough, naive: bool, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "viewport {}x{}, top bar {}",
        walkthrough.viewport.width, walkthrough.viewport.height, walkthrough.top_bar
    )?;
    for step in &walkthrough.steps {
        let a = step.anchor;
        writeln!(out)?;
        writeln!(
            out,
            "step {} ({}): anchor ({}, {}) {}x{}",
            step.index, step.label, a.x, a.y, a.width, a.height
        )?;
        if naive {
            let n = step.naive_anchor;
            writeln!(
                out,
                "  naive ({}, {}), off by ({}, {})",
                n.x, n.y, step.naive_error.dx, step.naive_error.dy
            )?;
        }
        let d = step.dialog.rect;
        writeln!(
            out,
            "  dialog {:?} at ({}, {}) {}x{}{}",
            step.dialog.side,
            d.x,
            d.y,
            d.width,
            d.height,
            if step.dialog.flipped { ", flipped" } else { "" }
        )?;
        for line in &step.canvas {
            writeln!(out, "  {line}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "final state: {:?}", walkthrough.final_state)?;
    Ok(())
}
