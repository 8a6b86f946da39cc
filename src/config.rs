use crate::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_SEQUENCE_TIMEOUT_MINUTES: i64 = 30;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Prefix every command alias must start with.
    pub command_prefix: String,
    /// Minutes of inactivity after which a live sequence is torn down.
    pub sequence_timeout_minutes: i64,
    /// Channel receiving kick and word-filter reports, if any.
    pub audit_log_channel_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here with `std::env::var`; tests pass a map instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let sequence_timeout_minutes = match lookup("SEQUENCE_TIMEOUT_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::InvalidEnvVar(
                        "SEQUENCE_TIMEOUT_MINUTES".to_string(),
                        raw,
                    )
                    .into())
                }
            },
            None => DEFAULT_SEQUENCE_TIMEOUT_MINUTES,
        };

        let audit_log_channel_id = match lookup("AUDIT_LOG_CHANNEL_ID") {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidEnvVar("AUDIT_LOG_CHANNEL_ID".to_string(), raw.clone())
            })?),
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            command_prefix: lookup("COMMAND_PREFIX")
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            sequence_timeout_minutes,
            audit_log_channel_id,
        })
    }
}
