//! Text views for the interactive session.
//!
//! - `inputs` - Input panel with lock markers
//! - `lesson` - Step picker and the active step's lesson
//! - `comparison` - Current vs Original Scenario table
//! - `status_bar` - Command hints

mod comparison;
mod inputs;
mod lesson;
mod status_bar;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use ebitda_core::{Scenario, SessionState};

pub use comparison::{emphasis_marker, render_comparison};
pub use inputs::render_inputs;
pub use lesson::{render_lesson, render_step_nav};
pub use status_bar::{KeyHint, build_status_bar, hints};

use crate::commands::USAGE;

/// Settings shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI colour and bold. Turned off for pipes, scripts, and tests.
    pub color: bool,
}

fn new_table(options: &RenderOptions) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !options.color {
        table.force_no_tty();
    }
    table
}

/// Renders one full screen for the session's current layout.
///
/// Compact layout: scenario, step picker, inputs, lesson, plain table.
/// Desktop layout: the same panels with a coloured comparison table and the
/// full step list.
pub fn render_screen(
    session: &SessionState,
    options: &RenderOptions,
) -> String {
    let scenario = session.scenario();
    let mut out = String::new();

    out.push_str(&format!("Scenario: {}\n", scenario.label()));
    out.push_str(&format!("  {}\n\n", scenario.hint()));

    if session.is_mobile() {
        out.push_str(&format!("Step: {}\n\n", session.step().title()));
    } else {
        out.push_str(&format!("{}\n\n", render_step_nav(session.step())));
    }
    if session.is_explore() {
        out.push_str("Explore mode: all inputs unlocked\n");
    }

    out.push_str(&render_inputs(session, options));
    out.push_str("\n\n");
    out.push_str(&render_lesson(session));
    out.push('\n');

    out.push_str("Full results snapshot (Current vs Original)\n");
    out.push_str(&render_comparison(
        &session.comparison(),
        !session.is_mobile(),
        options,
    ));
    out.push_str("\n\n");

    out.push_str(&build_status_bar(&[
        hints::SET,
        hints::PREV,
        hints::NEXT,
        hints::LOAD,
        hints::HELP,
        hints::QUIT,
    ]));
    out.push('\n');
    out
}

/// Lists the scenario catalog with keys and hints.
pub fn render_scenarios(options: &RenderOptions) -> String {
    let mut table = new_table(options);
    table.set_header(vec!["Scenario", "Key", "What to watch"]);
    for scenario in Scenario::ALL {
        table.add_row(vec![scenario.label(), scenario.key(), scenario.hint()]);
    }
    table.to_string()
}

pub fn render_help() -> String {
    USAGE
        .iter()
        .map(|(usage, what)| format!("  {usage:<28} {what}"))
        .collect::<Vec<_>>()
        .join("\n")
}
