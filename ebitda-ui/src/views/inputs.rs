//! Input panel: the seven fields with their lock state.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use ebitda_core::{InputField, SessionState};

use super::{RenderOptions, new_table};

/// Renders the input panel. Editable fields are bold and tagged so the
/// learner can see which knobs the current step is about.
pub fn render_inputs(
    session: &SessionState,
    options: &RenderOptions,
) -> String {
    let mut table: Table = new_table(options);
    table.set_header(vec!["Input", "Value", ""]);

    for field in InputField::ALL {
        let value = session.inputs().get(field).normalize().to_string();
        let row = if session.is_locked(field) {
            vec![
                Cell::new(field.label()).fg(Color::DarkGrey),
                Cell::new(value)
                    .fg(Color::DarkGrey)
                    .set_alignment(CellAlignment::Right),
                Cell::new("locked").fg(Color::DarkGrey),
            ]
        } else {
            vec![
                Cell::new(field.label()).add_attribute(Attribute::Bold),
                Cell::new(value)
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("editable ({})", field.key())).fg(Color::Cyan),
            ]
        };
        table.add_row(row);
    }

    table.to_string()
}
