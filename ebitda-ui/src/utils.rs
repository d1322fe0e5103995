use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when typed text is not a number.
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseNumberError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips whitespace, a leading dollar sign, and thousands separators.
fn normalize_number_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '_')
        .collect()
}

/// Parses a typed input value into a [`Decimal`].
///
/// Accepts `"1,234.56"`, `"$120,000"`, and scientific notation such as
/// `"1.2e5"`. Empty input is an error rather than zero so a stray
/// `set unit_price` does not wipe the field.
pub fn parse_number(s: &str) -> Result<Decimal, ParseNumberError> {
    let normalized = normalize_number_input(s);
    let parsed = if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized)
    } else {
        normalized.parse()
    };
    parsed.map_err(|e| {
        tracing::debug!(input = %s, "rejected number: {}", e);
        ParseNumberError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses `on`/`off` style switches.
pub fn parse_switch(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
