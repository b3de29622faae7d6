//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action to run, currently always the API
//! server with its document store configuration.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::store;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let store_opts = store::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        store_url: store_opts.url,
        store_secret: store_opts.secret,
        store_timeout: store_opts.timeout,
        lenient_lookup: store_opts.lenient_lookup,
    }))
}
