use clap::{builder::BoolishValueParser, Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_STORE_URL: &str = "store-url";
pub const ARG_STORE_SECRET: &str = "store-secret";
pub const ARG_STORE_TIMEOUT: &str = "store-timeout";
pub const ARG_LENIENT_LOOKUP: &str = "lenient-lookup";

#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
    pub secret: SecretString,
    pub timeout: Option<Duration>,
    pub lenient_lookup: bool,
}

impl Options {
    /// Parse document store arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing or empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let Some(url) = get_non_empty(ARG_STORE_URL) else {
            anyhow::bail!("missing required argument: --{ARG_STORE_URL}");
        };

        let Some(secret) = get_non_empty(ARG_STORE_SECRET) else {
            anyhow::bail!("missing required argument: --{ARG_STORE_SECRET}");
        };

        Ok(Self {
            url,
            secret: SecretString::from(secret),
            timeout: matches
                .get_one::<u64>(ARG_STORE_TIMEOUT)
                .copied()
                .map(Duration::from_secs),
            lenient_lookup: matches.get_flag(ARG_LENIENT_LOOKUP),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE_URL)
                .long(ARG_STORE_URL)
                .help("Document store base URL, example: https://store.example.com")
                .env("AUTHGATE_STORE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_STORE_SECRET)
                .long(ARG_STORE_SECRET)
                .help("Document store secret, sent as the `auth` query parameter")
                .env("AUTHGATE_STORE_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_STORE_TIMEOUT)
                .long(ARG_STORE_TIMEOUT)
                .help("Document store request timeout in seconds (default: no timeout)")
                .env("AUTHGATE_STORE_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_LENIENT_LOOKUP)
                .long(ARG_LENIENT_LOOKUP)
                .help("Let signup treat a failed store lookup as a missing user instead of a 500")
                .long_help(
                    "Let signup treat a failed store lookup as a missing user instead of answering 500.\n\nWith this flag a store outage lets signup proceed to the write. Login is unaffected and still answers 500 when the lookup fails.",
                )
                .env("AUTHGATE_LENIENT_LOOKUP")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
}
