//! Status line listing the keys that matter on the current screen.

/// Command hint for the status line.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Joins hints into a single status line.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Common hints for the lesson screen.
pub mod hints {
    use super::KeyHint;

    pub const SET: KeyHint = KeyHint::new("set <field> <value>", "Edit");
    pub const NEXT: KeyHint = KeyHint::new("n", "Next step");
    pub const PREV: KeyHint = KeyHint::new("p", "Prev step");
    pub const LOAD: KeyHint = KeyHint::new("load <scenario>", "Scenario");
    pub const HELP: KeyHint = KeyHint::new("?", "Help");
    pub const QUIT: KeyHint = KeyHint::new("q", "Quit");
}
