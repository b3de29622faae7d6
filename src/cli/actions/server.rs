use crate::{
    api::{
        self,
        handlers::{AppState, LookupPolicy},
    },
    store::{StoreClient, StoreConfig},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub store_url: String,
    pub store_secret: SecretString,
    pub store_timeout: Option<Duration>,
    pub lenient_lookup: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the store configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let config = StoreConfig::new(&args.store_url, args.store_secret)
        .with_context(|| format!("Invalid document store URL: {}", redact_url(&args.store_url)))?
        .with_timeout(args.store_timeout);

    let store = StoreClient::new(config).context("Failed to build document store client")?;

    let lookup = if args.lenient_lookup {
        warn!("Lenient lookup enabled: signup treats store lookup failures as missing users");
        LookupPolicy::Lenient
    } else {
        LookupPolicy::Strict
    };

    api::new(args.port, AppState::new(store, lookup)).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("store_url", redact_url(&args.store_url)),
        ("store_secret_set", "true".to_string()),
        (
            "store_timeout",
            args.store_timeout
                .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs())),
        ),
        ("lenient_lookup", args.lenient_lookup.to_string()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} ({})\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        crate::GIT_COMMIT_HASH
    );
    for (key, value) in entries {
        message.push_str(&format!("\n  {key:<max_key_len$} : {value}"));
    }

    info!("{}", message);
}

/// Drop credentials and query string from a URL before logging it.
fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.set_query(None);
            parsed.to_string()
        }
        Err(_) => "invalid-url".to_string(),
    }
}
