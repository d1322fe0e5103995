//! Lesson panel for the active step.

use ebitda_core::{SessionState, Step, format};

/// Step picker, marking the active step.
pub fn render_step_nav(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|step| {
            if *step == current {
                format!("[{}]", step.title())
            } else {
                step.title()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Heading, formula, and the step's highlighted metrics for the current inputs.
pub fn render_lesson(session: &SessionState) -> String {
    let step = session.step();
    let results = session.current_results();

    let mut out = String::new();
    out.push_str(&format!("### {}\n", step.heading()));
    out.push_str(&format!("{}\n\n", step.formula()));
    for highlight in step.highlights() {
        let value = format::metric_value(highlight.metric.format(), results.get(highlight.metric));
        out.push_str(&format!("  {:<30} {value:>14}\n", highlight.label));
    }
    out
}
