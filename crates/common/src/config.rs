use std::collections::HashMap;
use std::ffi::OsString;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Prefix of the per-channel bot token variables, e.g. `TELEGRAM_TOKEN_START_TREND`.
pub const TOKEN_ENV_PREFIX: &str = "TELEGRAM_TOKEN_";

/// User id notified when the caller does not name any.
pub const DEFAULT_USER: &str = "default";

/// Runtime configuration loaded from environment variables at startup.
/// Channel tokens are never compiled into the binary; they only come from here.
#[derive(Clone)]
pub struct Config {
    /// Channel name (lower-case) -> bot token.
    pub channel_tokens: HashMap<String, String>,

    /// Path of the notification routing/users TOML file.
    pub notify_config_path: String,

    /// Optional preset overlay file.
    pub preset_config_path: Option<String>,

    /// Users notified when none are requested explicitly.
    pub default_users: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut channels: Vec<&String> = self.channel_tokens.keys().collect();
        channels.sort();
        f.debug_struct("Config")
            .field("channel_tokens", &channels)
            .field("notify_config_path", &self.notify_config_path)
            .field("preset_config_path", &self.preset_config_path)
            .field("default_users", &self.default_users)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_vars(utf8_vars(std::env::vars_os()))
    }

    /// Build configuration from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut channel_tokens = HashMap::new();
        for (key, value) in &vars {
            let Some(channel) = key.strip_prefix(TOKEN_ENV_PREFIX) else {
                continue;
            };
            if channel.is_empty() {
                return Err(Error::Config(format!(
                    "'{TOKEN_ENV_PREFIX}' must be followed by a channel name"
                )));
            }
            let token = value.trim();
            if token.is_empty() {
                warn!(variable = %key, "Channel token is empty; treating channel as unset");
                continue;
            }
            debug!(channel = %channel.to_lowercase(), "Loaded channel token");
            channel_tokens.insert(channel.to_lowercase(), token.to_string());
        }

        let default_users = match vars.get("NOTIFY_USERS") {
            Some(raw) => {
                let users = split_list(raw);
                if users.is_empty() {
                    return Err(Error::Config("NOTIFY_USERS is set but lists no users".into()));
                }
                users
            }
            None => vec![DEFAULT_USER.to_string()],
        };

        Ok(Config {
            channel_tokens,
            notify_config_path: vars
                .get("NOTIFY_CONFIG_PATH")
                .cloned()
                .unwrap_or_else(|| "config/notify.toml".to_string()),
            preset_config_path: vars
                .get("PRESET_CONFIG_PATH")
                .filter(|p| !p.trim().is_empty())
                .cloned(),
            default_users,
        })
    }
}

/// Keep only variables whose name and value are valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<(String, String)> {
    vars.into_iter()
        .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
            (Ok(k), Ok(v)) => Some((k, v)),
            (Ok(k), Err(_)) => {
                debug!(variable = %k, "Skipping non UTF-8 environment value");
                None
            }
            _ => None,
        })
        .collect()
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
