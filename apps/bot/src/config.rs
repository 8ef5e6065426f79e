use std::env::var;

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;

pub const DEFAULT_BROADCAST_CRON: &str = "0 0 10-23 * * *";

#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_token: String,
    /// Six-field cron expression (with seconds).
    pub broadcast_cron: String,
    pub broadcast_tz: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(telegram_token) = get("TELEGRAM_API_KEY") else {
            bail!("TELEGRAM_API_KEY not set");
        };

        let broadcast_cron =
            get("BROADCAST_CRON").unwrap_or_else(|| DEFAULT_BROADCAST_CRON.to_string());

        let broadcast_tz = match get("BROADCAST_TZ") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid BROADCAST_TZ `{name}`"))?,
            None => Tz::UTC,
        };

        Ok(Self {
            telegram_token: telegram_token.trim().to_string(),
            broadcast_cron,
            broadcast_tz,
        })
    }
}
