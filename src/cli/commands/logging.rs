//! `-v/--verbose` and `AUTHGATE_LOG_LEVEL`.
//!
//! Both feed a single counter: each `-v` adds one, and the env var accepts
//! either the counter value or a level name.

use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `"3"` or `"debug"` both mean three steps above the default.
fn parse_verbosity(value: &str) -> Result<u8, String> {
    let value = value.trim().to_ascii_lowercase();

    LEVEL_NAMES
        .iter()
        .position(|name| *name == value)
        .and_then(|step| u8::try_from(step).ok())
        .or_else(|| value.parse::<u8>().ok().filter(|step| *step <= 5))
        .ok_or_else(|| {
            format!("invalid log level '{value}', expected 0-5 or one of {LEVEL_NAMES:?}")
        })
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|value: &str| parse_verbosity(value))
}

/// Map a verbosity counter to a tracing level; `None` keeps the ERROR default.
#[must_use]
pub const fn verbosity_level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[must_use]
pub fn level_from_matches(matches: &ArgMatches) -> Option<Level> {
    verbosity_level(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log verbosity, repeat to raise: -v WARN, -vv INFO, -vvv DEBUG, -vvvv TRACE (default: ERROR)")
            .env("AUTHGATE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_verbosity_accepts_names_and_numbers() {
        assert_eq!(parse_verbosity("error"), Ok(0));
        assert_eq!(parse_verbosity("INFO"), Ok(2));
        assert_eq!(parse_verbosity(" trace "), Ok(4));
        assert_eq!(parse_verbosity("3"), Ok(3));
        assert_eq!(parse_verbosity("5"), Ok(5));
    }

    #[test]
    fn parse_verbosity_rejects_unknown() {
        assert!(parse_verbosity("6").is_err());
        assert!(parse_verbosity("verbose").is_err());
        assert!(parse_verbosity("").is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some(Level::WARN));
        assert_eq!(verbosity_level(2), Some(Level::INFO));
        assert_eq!(verbosity_level(3), Some(Level::DEBUG));
        assert_eq!(verbosity_level(4), Some(Level::TRACE));
        assert_eq!(verbosity_level(9), Some(Level::TRACE));
    }
}
