//! "Current vs Original" results table.

use comfy_table::{Attribute, Cell, CellAlignment, Color};
use ebitda_core::{ComparisonRow, Emphasis, format};

use super::{RenderOptions, new_table};

fn styled(
    text: String,
    emphasis: Emphasis,
    options: &RenderOptions,
) -> Cell {
    if !options.color {
        let marked = format!("{} {text}", emphasis_marker(emphasis));
        return Cell::new(marked).set_alignment(CellAlignment::Right);
    }
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    match emphasis {
        Emphasis::Neutral => cell,
        Emphasis::Favorable => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        Emphasis::Unfavorable => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

/// Renders the comparison rows.
///
/// The desktop layout colours the Current and Variance cells by direction
/// of change, or prefixes arrows when colour is off. The compact layout
/// prints plain values.
pub fn render_comparison(
    rows: &[ComparisonRow],
    desktop: bool,
    options: &RenderOptions,
) -> String {
    let mut table = new_table(options);
    table.set_header(vec!["", "Current", "Original Scenario", "Variance"]);

    for row in rows {
        let current = format::money(row.current);
        let baseline = format::money(row.baseline);
        let variance = format::money(row.variance);

        let cells = if desktop {
            vec![
                Cell::new(row.metric.label()),
                styled(current, row.current_emphasis(), options),
                styled(baseline, row.baseline_emphasis(), options),
                styled(variance, row.variance_emphasis(), options),
            ]
        } else {
            vec![
                Cell::new(row.metric.label()),
                Cell::new(current).set_alignment(CellAlignment::Right),
                Cell::new(baseline).set_alignment(CellAlignment::Right),
                Cell::new(variance).set_alignment(CellAlignment::Right),
            ]
        };
        table.add_row(cells);
    }

    table.to_string()
}

/// Text marker standing in for colour, e.g. `▲ $16,500`.
pub fn emphasis_marker(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Neutral => " ",
        Emphasis::Favorable => "▲",
        Emphasis::Unfavorable => "▼",
    }
}
