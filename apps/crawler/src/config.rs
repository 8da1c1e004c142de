use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;
use url::Url;

/// Default poll period in seconds.
const DEFAULT_INTERVAL_SECS: u64 = 10;
/// Default registry endpoint.
const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Default bound on concurrently running measurement tasks.
const DEFAULT_MAX_IN_FLIGHT: usize = 64;

/// Immutable runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time between crawl cycles.
    pub interval: Duration,
    /// Base URL of the registry API.
    pub api_url: Url,
    /// Upper bound on concurrently running measurement tasks.
    pub max_in_flight: usize,
    /// Wait for a cycle's tasks to finish before sleeping again.
    pub drain_cycles: bool,
}

impl Config {
    /// Read the configuration from the environment.
    ///
    /// Malformed numeric or boolean values fall back to their defaults with
    /// a warning; a malformed `API_URL` refuses to start.
    pub fn from_env() -> Result<Self> {
        let interval_secs =
            parse_or_default("INTERVAL", env_var("INTERVAL"), DEFAULT_INTERVAL_SECS);

        let api_url = match env_var("API_URL") {
            Some(raw) => Url::parse(&raw).with_context(|| format!("invalid API_URL '{raw}'"))?,
            None => Url::parse(DEFAULT_API_URL).context("default API_URL is invalid")?,
        };

        let mut max_in_flight =
            parse_or_default("MAX_IN_FLIGHT", env_var("MAX_IN_FLIGHT"), DEFAULT_MAX_IN_FLIGHT);
        if max_in_flight == 0 {
            warn!("MAX_IN_FLIGHT must be positive, using {}", DEFAULT_MAX_IN_FLIGHT);
            max_in_flight = DEFAULT_MAX_IN_FLIGHT;
        }

        let drain_cycles = parse_or_default("DRAIN_CYCLES", env_var("DRAIN_CYCLES"), false);

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            api_url,
            max_in_flight,
            drain_cycles,
        })
    }
}

/// Read a variable, treating unset and empty the same way.
fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Parse an optional raw value, warning and falling back on garbage.
fn parse_or_default<T: FromStr + Display + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };

    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring unparseable {} value '{}', using {}", name, raw, default);
            default
        }
    }
}
