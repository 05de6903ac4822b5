//! Environment-driven bot configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial configuration with dispatch tuning knobs

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default interval between two invocations of the same command by the same user
pub const DEFAULT_COMMAND_COOLDOWN_MS: u64 = 3_000;
/// Default lifetime of a cached permission decision
pub const DEFAULT_PERMISSION_CACHE_TTL_MS: u64 = 60_000;
/// Default interval of the expired-entry sweep
pub const DEFAULT_CACHE_SWEEP_INTERVAL_SECS: u64 = 300;
/// Longest accepted cooldown or cache lifetime (one year)
pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Development guild; commands are registered globally when unset
    pub discord_guild_id: Option<u64>,
    pub log_level: String,
    pub command_cooldown: Duration,
    pub permission_cache_ttl: Duration,
    pub cache_sweep_interval: Duration,
    /// Error tracker webhook; reports only go to the log when unset
    pub error_webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let discord_guild_id = parse_optional(&lookup, "DISCORD_GUILD_ID")?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let command_cooldown = Duration::from_millis(
            parse_optional(&lookup, "COMMAND_COOLDOWN_MS")?.unwrap_or(DEFAULT_COMMAND_COOLDOWN_MS),
        );
        let permission_cache_ttl = Duration::from_millis(
            parse_optional(&lookup, "PERMISSION_CACHE_TTL_MS")?
                .unwrap_or(DEFAULT_PERMISSION_CACHE_TTL_MS),
        );
        let cache_sweep_interval = Duration::from_secs(
            parse_optional(&lookup, "CACHE_SWEEP_INTERVAL_SECS")?
                .unwrap_or(DEFAULT_CACHE_SWEEP_INTERVAL_SECS),
        );
        ensure_window("COMMAND_COOLDOWN_MS", command_cooldown)?;
        ensure_window("PERMISSION_CACHE_TTL_MS", permission_cache_ttl)?;
        ensure_window("CACHE_SWEEP_INTERVAL_SECS", cache_sweep_interval)?;
        if cache_sweep_interval.is_zero() {
            anyhow::bail!("CACHE_SWEEP_INTERVAL_SECS must be greater than zero");
        }

        let error_webhook_url = lookup("ERROR_WEBHOOK_URL").filter(|u| !u.trim().is_empty());

        Ok(Config {
            discord_token,
            discord_guild_id,
            log_level,
            command_cooldown,
            permission_cache_ttl,
            cache_sweep_interval,
            error_webhook_url,
        })
    }
}

fn ensure_window(key: &str, window: Duration) -> Result<()> {
    if window > MAX_WINDOW {
        anyhow::bail!(
            "{key} is too large: {}ms (at most {}ms)",
            window.as_millis(),
            MAX_WINDOW.as_millis()
        );
    }
    Ok(())
}

fn parse_optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        _ => Ok(None),
    }
}
