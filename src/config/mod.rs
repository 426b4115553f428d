use dotenvy::dotenv;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://saavn.dev";
const DEFAULT_LOG_FILE: &str = "/tmp/moodtunes.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub emotion: Option<String>,
    pub result_limit: u32,
    pub playlist_limit: u32,
    pub timeout: Duration,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            emotion: None,
            result_limit: 20,
            playlist_limit: 5,
            timeout: Duration::from_secs(15),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and the process environment. The first CLI
    /// argument, when given, wins over `MOODTUNES_EMOTION`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env is optional, plain env vars work too

        let lookup = |key: &str| std::env::var(key).ok();
        let mut config = Self::from_lookup(lookup)?;

        if let Some(arg) = std::env::args().nth(1).and_then(normalize_emotion) {
            config.emotion = Some(arg);
        }
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            api_url: lookup("MOODTUNES_API_URL")
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            emotion: lookup("MOODTUNES_EMOTION").and_then(normalize_emotion),
            result_limit: parse_bounded(&lookup, "MOODTUNES_RESULT_LIMIT", 20, 1, 100)? as u32,
            playlist_limit: parse_bounded(&lookup, "MOODTUNES_PLAYLIST_LIMIT", 5, 1, 20)? as u32,
            timeout: Duration::from_secs(parse_bounded(
                &lookup,
                "MOODTUNES_TIMEOUT_SECS",
                15,
                1,
                600,
            )?),
            log_file: lookup("MOODTUNES_LOG_FILE").unwrap_or(defaults.log_file),
        })
    }
}

/// Trimmed label, or `None` when nothing is left.
pub fn normalize_emotion(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_bounded<F>(
    lookup: &F,
    key: &'static str,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.clone(),
    })?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { key, value, min, max });
    }
    Ok(value)
}
