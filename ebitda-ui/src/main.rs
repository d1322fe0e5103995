use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ebitda_core::{Scenario, Step};
use tracing::debug;

use ebitda_ui::{App, config::AppConfig, logging, views::RenderOptions};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Interactive EBITDA tutor for a processing plant.
///
/// Walks through revenue, variable cost, contribution, fixed cost, and EBITDA
/// one step at a time, comparing every edit against the loaded scenario.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML file with `[session]` and `[display]` settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenario to load at startup, e.g. `energy-spike`.
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Starting lesson step, 1-6.
    #[arg(long)]
    step: Option<Step>,

    /// Unlock every input regardless of step.
    #[arg(long)]
    explore: bool,

    /// Use the desktop layout with a coloured comparison table.
    #[arg(long)]
    desktop: bool,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Disable ANSI colour in rendered tables.
    #[arg(long)]
    no_color: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.display.log_level, cli.log_file.as_deref())?;
    debug!(?cli, "starting");

    if cli.scenario.is_some() {
        config.session.scenario = cli.scenario;
    }
    if let Some(step) = cli.step {
        config.session.step = step;
    }
    if cli.explore {
        config.session.explore = true;
    }
    if cli.desktop {
        config.session.mobile = false;
    }

    let color = config.display.color && !cli.no_color && io::stdout().is_terminal();
    let mut app = App::new(config.build_session(), RenderOptions { color });

    let stdout = io::stdout().lock();
    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open script '{}'", path.display()))?;
            app.run(BufReader::new(file), stdout)
        }
        None => app.run(io::stdin().lock(), stdout),
    }
}
