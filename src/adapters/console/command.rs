//! Console command parsing.
//!
//! Lines starting with `/` are commands; anything else is a question for
//! the consultant.

use std::path::PathBuf;

/// Help text printed by `/help`.
pub const HELP: &str = "\
Commands:
  /scenarios             list scenario presets
  /scenario <id>         select a scenario (intake only)
  /set <field> <value>   fill an intake field
                         fields: store_name region sub_location category
                         location_type sales_tier concern demographic_tags
  /submit                submit the intake form and get a diagnosis
  /prescribe             issue the final prescription
  /export [path]         save the prescription report
  /view                  show the current session
  /restart               discard the session and start over
  /help                  show this help
  /quit                  exit
Any other text is sent to the consultant as a question.";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Empty,
    Scenarios,
    Scenario(String),
    Set { field: String, value: String },
    Submit,
    Prescribe,
    Export(Option<PathBuf>),
    View,
    Restart,
    Help,
    Quit,
    Ask(String),
}

/// Errors raised while parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '/{0}', type /help for the list")]
    Unknown(String),

    #[error("/{command} needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

impl ConsoleCommand {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ConsoleCommand::Empty);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ConsoleCommand::Ask(line.to_string()));
        };

        let (name, args) = split_word(rest);
        let command = match name {
            "scenarios" => ConsoleCommand::Scenarios,
            "scenario" => ConsoleCommand::Scenario(required(args, "scenario", "a scenario id")?),
            "set" => {
                let (field, value) = split_word(args);
                if field.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        argument: "a field name",
                    });
                }
                ConsoleCommand::Set {
                    field: field.to_string(),
                    value: required(value, "set", "a value")?,
                }
            }
            "submit" => ConsoleCommand::Submit,
            "prescribe" => ConsoleCommand::Prescribe,
            "export" => ConsoleCommand::Export((!args.is_empty()).then(|| PathBuf::from(args))),
            "view" => ConsoleCommand::View,
            "restart" | "clear" => ConsoleCommand::Restart,
            "help" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

fn required(
    value: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(value.to_string())
    }
}
