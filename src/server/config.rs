use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MESSAGE_RETENTION_LIMIT: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// The Discord bot only starts when a token is configured
    pub discord_bot_token: Option<String>,
    /// Shared secret expected in the `x-webhook-secret` header, if set
    pub webhook_secret: Option<String>,

    /// Discord roles that can see every firm
    pub admin_role_ids: Vec<String>,
    /// Channels monitored by the bot in addition to the firms' channels
    pub monitored_channel_ids: Vec<String>,

    pub fivem_server_url: Option<String>,
    pub firms_seed_path: Option<String>,
    pub message_retention_limit: u64,
    pub cors_allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            discord_bot_token: None,
            webhook_secret: None,
            admin_role_ids: Vec::new(),
            monitored_channel_ids: Vec::new(),
            fivem_server_url: None,
            firms_seed_path: None,
            message_retention_limit: DEFAULT_MESSAGE_RETENTION_LIMIT,
            cors_allowed_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    ///
    /// Blank values are treated as unset.
    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let message_retention_limit = match var("MESSAGE_RETENTION_LIMIT") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "MESSAGE_RETENTION_LIMIT".to_string(),
                    reason: format!("'{}' is not a positive integer", value),
                })?,
            None => DEFAULT_MESSAGE_RETENTION_LIMIT,
        };

        let fivem_server_url = match var("FIVEM_SERVER_URL") {
            Some(value) => {
                url::Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
                    name: "FIVEM_SERVER_URL".to_string(),
                    reason: e.to_string(),
                })?;
                Some(value.trim_end_matches('/').to_string())
            }
            None => None,
        };

        Ok(Self {
            database_url: var("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            discord_bot_token: var("DISCORD_BOT_TOKEN"),
            webhook_secret: var("WEBHOOK_SECRET"),
            admin_role_ids: split_list(var("ADMIN_ROLE_IDS")),
            monitored_channel_ids: split_list(var("MONITORED_CHANNEL_IDS")),
            fivem_server_url,
            firms_seed_path: var("FIRMS_SEED_PATH"),
            message_retention_limit,
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
        })
    }
}

/// Splits a comma-separated list, dropping blank entries
fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
