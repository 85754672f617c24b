use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextMessage,
    Increment,
    Decrement,
    Reset,
    SetName(String),
    Fetch,
    Health,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  next          show the next local message
  inc | dec     change the counter
  reset         reset the counter to zero
  name [text]   set the name sent with 'fetch' (empty clears it)
  fetch         fetch a greeting from the backend
  health        re-check backend health
  show          print the current state
  quit          exit";

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "next" | "n" => Ok(Self::NextMessage),
            "inc" | "+" => Ok(Self::Increment),
            "dec" | "-" => Ok(Self::Decrement),
            "reset" => Ok(Self::Reset),
            "name" => Ok(Self::SetName(rest.to_string())),
            "fetch" | "f" => Ok(Self::Fetch),
            "health" => Ok(Self::Health),
            "show" | "s" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandParseError::Unknown(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands_case_insensitively() {
        assert_eq!("next".parse::<Command>(), Ok(Command::NextMessage));
        assert_eq!("  INC ".parse::<Command>(), Ok(Command::Increment));
        assert_eq!("-".parse::<Command>(), Ok(Command::Decrement));
        assert_eq!("Quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn name_keeps_inner_whitespace() {
        assert_eq!(
            "name   Ada Lovelace  ".parse::<Command>(),
            Ok(Command::SetName("Ada Lovelace".to_string()))
        );
        assert_eq!("name".parse::<Command>(), Ok(Command::SetName(String::new())));
    }

    #[test]
    fn rejects_blank_and_unknown_input() {
        assert_eq!("   ".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "launch rockets".parse::<Command>(),
            Err(CommandParseError::Unknown("launch".to_string()))
        );
    }
}
