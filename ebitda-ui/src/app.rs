//! The command loop that drives one tutoring session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use ebitda_core::{SessionError, SessionState, format};
use tracing::{debug, info};

use crate::commands::{Command, CommandError};
use crate::export::{ExportError, export_comparison};
use crate::logging;
use crate::views::{self, RenderOptions};

/// What the loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; draw the screen again, optionally after a message.
    Redraw(Option<String>),
    /// Print a message and leave the screen as it is.
    Message(String),
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0}")]
    Log(String),
}

pub struct App {
    pub session: SessionState,
    pub options: RenderOptions,
}

impl App {
    pub fn new(
        session: SessionState,
        options: RenderOptions,
    ) -> Self {
        Self { session, options }
    }

    pub fn render(&self) -> String {
        views::render_screen(&self.session, &self.options)
    }

    /// Applies one command to the session.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Result<Outcome, AppError> {
        debug!(?command, "executing");
        let outcome = match command {
            Command::Show => Outcome::Redraw(None),
            Command::Set { field, value } => {
                self.session.set_input(field, value)?;
                Outcome::Redraw(None)
            }
            Command::Nudge { field, direction } => {
                let value = self.session.nudge(field, direction)?;
                Outcome::Redraw(Some(format!("{} = {}", field.label(), value.normalize())))
            }
            Command::Step(step) => {
                self.session.set_step(step);
                Outcome::Redraw(None)
            }
            Command::Next => {
                self.session.next_step();
                Outcome::Redraw(None)
            }
            Command::Prev => {
                self.session.prev_step();
                Outcome::Redraw(None)
            }
            Command::Load(scenario) => {
                let (_, baseline) = self.session.load(scenario);
                Outcome::Redraw(Some(format!(
                    "Loaded {}; original EBITDA is {}",
                    scenario.label(),
                    format::money(baseline.ebitda)
                )))
            }
            Command::Scenarios => Outcome::Message(views::render_scenarios(&self.options)),
            Command::Reset => {
                self.session.reset();
                Outcome::Redraw(Some("Inputs restored to defaults".to_string()))
            }
            Command::Explore(on) => {
                self.session.set_explore(on);
                Outcome::Redraw(None)
            }
            Command::Mobile(on) => {
                self.session.set_mobile(on);
                Outcome::Redraw(None)
            }
            Command::Export(path) => {
                export_comparison(&path, &self.session.comparison())?;
                Outcome::Message(format!("Wrote {}", path.display()))
            }
            Command::Log(level) => {
                logging::set_log_level(&level).map_err(|e| AppError::Log(e.to_string()))?;
                Outcome::Message(format!("Log filter set to '{level}'"))
            }
            Command::Help => Outcome::Message(views::render_help()),
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    /// Parses and applies one input line.
    pub fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<Option<Outcome>, AppError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// Command errors are printed and the loop carries on; only I/O
    /// failures on `input` or `output` end the session early.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<()> {
        info!(scenario = self.session.scenario().label(), "session started");
        write!(output, "{}", self.render()).context("cannot write to output")?;

        for line in input.lines() {
            let line = line.context("cannot read command")?;
            match self.handle_line(&line) {
                Ok(None) => continue,
                Ok(Some(Outcome::Quit)) => break,
                Ok(Some(Outcome::Message(message))) => writeln!(output, "{message}")?,
                Ok(Some(Outcome::Redraw(message))) => {
                    if let Some(message) = message {
                        writeln!(output, "{message}")?;
                    }
                    write!(output, "{}", self.render())?;
                }
                Err(err) => writeln!(output, "error: {err}")?,
            }
            output.flush()?;
        }

        info!("session ended");
        Ok(())
    }
}
