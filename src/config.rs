//! Tracker configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::domain::{AmericanOdds, WagerDefaults, validate_stake};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

/// Top-level configuration.
///
/// Loaded once at startup via [`TrackerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// SQLite connection string for the key/value slot.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Master switch for the persistence layer.
    pub persistence_enabled: bool,

    /// Key under which the serialized wager list is stored.
    pub storage_slot: String,

    /// Number of recent results reported in dashboard stats.
    pub recent_results_limit: usize,

    /// Odds and stake applied when a new wager omits them.
    pub wager_defaults: WagerDefaults,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl TrackerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set or does
    /// not parse. Calls `dotenvy::dotenv().ok()` to optionally load a
    /// `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`], `DEFAULT_ODDS` is outside the American odds range,
    /// or `DEFAULT_STAKE_UNITS` is not positive.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://wager_tracker.db".to_string());
        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 5);
        let database_connect_timeout_secs = parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5);

        let persistence_enabled = parse_env_bool("PERSISTENCE_ENABLED", true);
        let storage_slot =
            std::env::var("STORAGE_SLOT").unwrap_or_else(|_| "wager_tracker_wagers".to_string());

        let recent_results_limit = parse_env("RECENT_RESULTS_LIMIT", 10);

        let wager_defaults = wager_defaults(
            parse_env("DEFAULT_ODDS", -110),
            parse_env("DEFAULT_STAKE_UNITS", 1.0_f64),
        )?;

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 1024);
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Plain,
        };

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections,
            database_connect_timeout_secs,
            persistence_enabled,
            storage_slot,
            recent_results_limit,
            wager_defaults,
            event_bus_capacity,
            request_timeout,
            log_format,
        })
    }
}

impl Default for TrackerConfig {
    /// In-memory defaults with persistence disabled.
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            database_connect_timeout_secs: 5,
            persistence_enabled: false,
            storage_slot: "wager_tracker_wagers".to_string(),
            recent_results_limit: 10,
            wager_defaults: WagerDefaults::default(),
            event_bus_capacity: 1024,
            request_timeout: Duration::from_secs(30),
            log_format: LogFormat::Plain,
        }
    }
}

/// Validates the configured fallback odds and stake.
fn wager_defaults(odds: i32, stake: f64) -> anyhow::Result<WagerDefaults> {
    let odds = AmericanOdds::new(odds).context("DEFAULT_ODDS must be <= -100 or >= 100")?;
    let stake = validate_stake(stake).context("DEFAULT_STAKE_UNITS must be a positive number")?;
    Ok(WagerDefaults { odds, stake })
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        assert_eq!(parse_env("WAGER_TRACKER_TEST_UNSET_KEY", 42_u32), 42);
        assert!(parse_env_bool("WAGER_TRACKER_TEST_UNSET_KEY", true));
    }

    #[test]
    fn default_is_in_memory() {
        let config = TrackerConfig::default();
        assert!(!config.persistence_enabled);
        assert_eq!(config.recent_results_limit, 10);
        assert_eq!(config.wager_defaults.odds, AmericanOdds::STANDARD);
    }

    #[test]
    fn invalid_defaults_are_errors() {
        assert!(wager_defaults(-110, 1.0).is_ok());
        assert!(wager_defaults(50, 1.0).is_err());
        for stake in [0.0, -2.0, f64::NAN] {
            let Err(err) = wager_defaults(-110, stake) else {
                panic!("stake {stake} must be rejected");
            };
            assert!(err.to_string().contains("DEFAULT_STAKE_UNITS"));
        }
    }
}
