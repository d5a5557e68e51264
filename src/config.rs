//! Process configuration, read once from the environment at startup

use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REDIS_PORT: u16 = 6379;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Redis connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub db: i64,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub api_base: String,
    /// Long-poll wait passed to `getUpdates`
    pub poll_timeout: Duration,
    pub redis: RedisConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;
        let api_base = get("TELEGRAM_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let poll_timeout = match get("LISTBOT_POLL_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("LISTBOT_POLL_TIMEOUT_SECS", value)?),
            None => Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        };

        let (host, port) = match get("REDIS_ADDR") {
            Some(addr) => parse_addr(&addr)?,
            None => ("127.0.0.1".to_string(), DEFAULT_REDIS_PORT),
        };
        let db = match get("REDIS_DB") {
            Some(value) => parse("REDIS_DB", value)?,
            None => 0,
        };

        Ok(Self {
            bot_token,
            api_base,
            poll_timeout,
            redis: RedisConfig {
                host,
                port,
                username: get("REDIS_USERNAME"),
                password: get("REDIS_PASSWORD"),
                db,
            },
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

/// `host:port` or bare `host`
fn parse_addr(addr: &str) -> Result<(String, u16), ConfigError> {
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            let port = parse("REDIS_ADDR", port.to_string()).map_err(|_| ConfigError::Invalid {
                var: "REDIS_ADDR",
                value: addr.to_string(),
            })?;
            Ok((host.to_string(), port))
        }
        None => Ok((addr.to_string(), DEFAULT_REDIS_PORT)),
    }
}
