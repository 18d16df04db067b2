use std::str::FromStr;
use thiserror::Error;

/// Wager typed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bet {
    Tokens(i64),
    /// Whatever the balance allows.
    Max,
}

/// One line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Spin(Bet),
    Auto { bet: i64, count: u32 },
    Stop,
    Risk,
    Ack,
    Reset,
    State,
    History,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("{field} must be a whole number (got {value})")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unexpected argument: {0}")]
    Unexpected(String),
}

pub const HELP: &str = "\
commands:
  spin <bet|max>      spin the reels
  auto <bet> <count>  spin <count> times in a row
  stop                stop autoplay
  risk                pay 1000 for a roll of the die (1 loses everything)
  ack                 keep playing after reaching the target
  reset | restart     start over with 100 tokens
  state               show balance and status
  history             show recent results, newest first
  help                show this message
  quit                leave the table";

fn number<T: FromStr>(field: &'static str, value: Option<&str>) -> Result<T, CommandError> {
    let value = value.ok_or(CommandError::MissingArgument(field))?;
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let command = match name.as_str() {
            "spin" | "s" => match words.next() {
                Some(word) if word.eq_ignore_ascii_case("max") => Command::Spin(Bet::Max),
                word => Command::Spin(Bet::Tokens(number("bet", word)?)),
            },
            "auto" | "a" => Command::Auto {
                bet: number("bet", words.next())?,
                count: number("count", words.next())?,
            },
            "stop" => Command::Stop,
            "risk" | "roulette" => Command::Risk,
            "ack" => Command::Ack,
            "reset" | "restart" => Command::Reset,
            "state" | "balance" => Command::State,
            "history" | "h" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };
        if let Some(extra) = words.next() {
            return Err(CommandError::Unexpected(extra.to_string()));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spin() {
        assert_eq!("spin 25".parse::<Command>(), Ok(Command::Spin(Bet::Tokens(25))));
        assert_eq!("SPIN max".parse::<Command>(), Ok(Command::Spin(Bet::Max)));
        assert_eq!("spin -3".parse::<Command>(), Ok(Command::Spin(Bet::Tokens(-3))));
        assert_eq!(
            "spin".parse::<Command>(),
            Err(CommandError::MissingArgument("bet"))
        );
        assert_eq!(
            "spin lots".parse::<Command>(),
            Err(CommandError::InvalidNumber {
                field: "bet",
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_parse_auto() {
        assert_eq!(
            "auto 5 10".parse::<Command>(),
            Ok(Command::Auto { bet: 5, count: 10 })
        );
        assert_eq!(
            "auto 5".parse::<Command>(),
            Err(CommandError::MissingArgument("count"))
        );
        assert!(matches!(
            "auto 5 -1".parse::<Command>(),
            Err(CommandError::InvalidNumber { field: "count", .. })
        ));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("restart".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("  risk  ".parse::<Command>(), Ok(Command::Risk));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "stop now".parse::<Command>(),
            Err(CommandError::Unexpected("now".to_string()))
        );
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            "".parse::<Command>(),
            Err(CommandError::Unknown(String::new()))
        );
    }
}
