use std::time::Duration;

use thiserror::Error;

use crate::conversation::SelectionPolicy;

pub const OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const OMDB_BASE_URL: &str = "OMDB_BASE_URL";
pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
pub const HTTP_TIMEOUT_SECS: &str = "MOVIEBOT_HTTP_TIMEOUT_SECS";
pub const POLL_TIMEOUT_SECS: &str = "MOVIEBOT_POLL_TIMEOUT_SECS";
pub const STRICT_SELECTION: &str = "MOVIEBOT_STRICT_SELECTION";

const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Clone)]
pub struct Settings {
    pub omdb_api_key: String,
    pub telegram_bot_token: String,
    pub omdb_base_url: String,
    pub telegram_api_url: String,
    pub http_timeout: Duration,
    pub poll_timeout: Duration,
    pub selection_policy: SelectionPolicy,
}

// Secrets stay out of logs and panics.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("omdb_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("omdb_base_url", &self.omdb_base_url)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("poll_timeout", &self.poll_timeout)
            .field("selection_policy", &self.selection_policy)
            .finish()
    }
}

impl Settings {
    /// Read the process environment, seeded from `.env` when one exists.
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let omdb_api_key = value(OMDB_API_KEY);
        let telegram_bot_token = value(TELEGRAM_BOT_TOKEN);
        let (omdb_api_key, telegram_bot_token) = match (omdb_api_key, telegram_bot_token) {
            (Some(key), Some(token)) => (key, token),
            (key, token) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push(OMDB_API_KEY);
                }
                if token.is_none() {
                    missing.push(TELEGRAM_BOT_TOKEN);
                }
                return Err(SettingsError::Missing(missing));
            }
        };

        let secs = |name: &'static str, default: u64| match value(name) {
            None => Ok(Duration::from_secs(default)),
            Some(raw) => match raw.parse::<u64>() {
                Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
                _ => Err(SettingsError::Invalid {
                    name,
                    value: raw,
                    reason: "expected a positive number of seconds",
                }),
            },
        };

        let selection_policy = match value(STRICT_SELECTION) {
            None => SelectionPolicy::default(),
            Some(raw) => match parse_flag(&raw) {
                Some(true) => SelectionPolicy::Strict,
                Some(false) => SelectionPolicy::Permissive,
                None => {
                    return Err(SettingsError::Invalid {
                        name: STRICT_SELECTION,
                        value: raw,
                        reason: "expected true or false",
                    })
                }
            },
        };

        Ok(Self {
            omdb_api_key,
            telegram_bot_token,
            omdb_base_url: value(OMDB_BASE_URL).unwrap_or_else(|| DEFAULT_OMDB_BASE_URL.into()),
            telegram_api_url: value(TELEGRAM_API_URL)
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into()),
            http_timeout: secs(HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?,
            poll_timeout: secs(POLL_TIMEOUT_SECS, DEFAULT_POLL_TIMEOUT_SECS)?,
            selection_policy,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
