//! Line commands understood by the interactive session.

use std::path::PathBuf;

use ebitda_core::{
    InputField, Nudge, Scenario, Step, StepError, UnknownFieldError, UnknownScenarioError,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::utils::{ParseNumberError, parse_number, parse_switch};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Set { field: InputField, value: Decimal },
    Nudge { field: InputField, direction: Nudge },
    Step(Step),
    Next,
    Prev,
    Load(Scenario),
    Scenarios,
    Reset,
    Explore(bool),
    Mobile(bool),
    Export(PathBuf),
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Field(#[from] UnknownFieldError),

    #[error(transparent)]
    Number(#[from] ParseNumberError),

    #[error(transparent)]
    Step(#[from] StepError),

    #[error(transparent)]
    Scenario(#[from] UnknownScenarioError),
}

/// One help line per command, shown by `help`.
pub const USAGE: &[(&str, &str)] = &[
    ("show", "redraw the lesson and results"),
    ("set <field> <value>", "change an input, e.g. set unit_price 180"),
    ("inc <field> / dec <field>", "nudge an input by one increment"),
    ("step <1-6>", "jump to a lesson step"),
    ("next / prev", "move one step forward or back"),
    ("scenarios", "list the scenario catalog"),
    ("load <scenario>", "load a scenario and make it the original"),
    ("reset", "restore the default inputs"),
    ("explore on|off", "unlock every input regardless of step"),
    ("mobile on|off", "switch between compact and desktop layout"),
    ("export <path>", "write the comparison table as CSV"),
    ("log <level>", "change the log filter, e.g. log debug"),
    ("help", "show this list"),
    ("quit", "leave the session"),
];

fn switch(
    arg: &str,
    usage: &'static str,
) -> Result<bool, CommandError> {
    parse_switch(arg).ok_or(CommandError::Usage(usage))
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "show" | "s" => Self::Show,
            "set" => {
                let (field, value) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("set <field> <value>"))?;
                Self::Set {
                    field: field.parse()?,
                    value: parse_number(value)?,
                }
            }
            "inc" | "+" => Self::Nudge {
                field: required(rest, "inc <field>")?.parse()?,
                direction: Nudge::Up,
            },
            "dec" | "-" => Self::Nudge {
                field: required(rest, "dec <field>")?.parse()?,
                direction: Nudge::Down,
            },
            "step" => Self::Step(required(rest, "step <1-6>")?.parse()?),
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "load" => Self::Load(required(rest, "load <scenario>")?.parse()?),
            "scenarios" => Self::Scenarios,
            "reset" => Self::Reset,
            "explore" => Self::Explore(switch(rest, "explore on|off")?),
            "mobile" => Self::Mobile(switch(rest, "mobile on|off")?),
            "export" => Self::Export(PathBuf::from(required(rest, "export <path>")?)),
            "log" => Self::Log(required(rest, "log <level>")?.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    rest: &'a str,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(Command::parse("   ").unwrap().is_none());
        assert!(Command::parse("# warm up").unwrap().is_none());
    }

    #[test]
    fn set_accepts_labels_with_spaces() {
        assert_eq!(
            parse("set Net saleable tons 950"),
            Command::Set {
                field: InputField::NetSaleableTons,
                value: dec!(950),
            }
        );
    }

    #[test]
    fn set_accepts_formatted_money() {
        assert_eq!(
            parse("set fixed_cost $110,000"),
            Command::Set {
                field: InputField::FixedCost,
                value: dec!(110000),
            }
        );
    }

    #[test]
    fn set_without_value_is_a_usage_error() {
        assert!(matches!(
            Command::parse("set unit_price"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            Command::parse("set"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn nudges_parse_direction() {
        assert_eq!(
            parse("dec labor_per_ton"),
            Command::Nudge {
                field: InputField::LaborPerTon,
                direction: Nudge::Down,
            }
        );
        assert_eq!(
            parse("+ fixed_cost"),
            Command::Nudge {
                field: InputField::FixedCost,
                direction: Nudge::Up,
            }
        );
    }

    #[test]
    fn step_and_navigation() {
        assert_eq!(parse("step 5"), Command::Step(Step::Ebitda));
        assert_eq!(parse("NEXT"), Command::Next);
        assert_eq!(parse("p"), Command::Prev);
        assert!(matches!(
            Command::parse("step 0"),
            Err(CommandError::Step(StepError::OutOfRange(0)))
        ));
    }

    #[test]
    fn load_accepts_multi_word_labels() {
        assert_eq!(parse("load Lower yield"), Command::Load(Scenario::LowerYield));
        assert!(matches!(
            Command::parse("load Demand boom"),
            Err(CommandError::Scenario(_))
        ));
    }

    #[test]
    fn switches_require_on_or_off() {
        assert_eq!(parse("explore on"), Command::Explore(true));
        assert_eq!(parse("mobile off"), Command::Mobile(false));
        assert!(matches!(
            Command::parse("explore"),
            Err(CommandError::Usage("explore on|off"))
        ));
    }

    #[test]
    fn export_keeps_path() {
        assert_eq!(
            parse("export out/results.csv"),
            Command::Export(PathBuf::from("out/results.csv"))
        );
    }

    #[test]
    fn unknown_verb_is_reported() {
        let err = Command::parse("jump 3").unwrap_err();

        assert_eq!(err.to_string(), "unknown command 'jump'; type 'help' for a list");
    }
}
