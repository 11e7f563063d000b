use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use common::Result;

use crate::tables::UserRecord;

/// Notification file (TOML). Tokens never live here; they come from the
/// environment.
///
/// Example `config/notify.toml`:
/// ```toml
/// [routing]
/// wedge_breakout = "start_trend"
///
/// [users.default]
/// name = "Desk"
/// chat_id = "100200300"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyFileConfig {
    /// Strategy -> channel entries laid over the built-in routing.
    #[serde(default)]
    pub routing: HashMap<String, String>,
    #[serde(default)]
    pub users: HashMap<String, UserRecord>,
}

impl NotifyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::parse(&content)?;
        info!(
            path = %path.display(),
            routes = cfg.routing.len(),
            users = cfg.users.len(),
            "Loaded notification config"
        );
        Ok(cfg)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_valid() {
        let cfg = NotifyFileConfig::parse("").unwrap();
        assert!(cfg.routing.is_empty());
        assert!(cfg.users.is_empty());
    }

    #[test]
    fn user_without_chat_id_is_rejected() {
        let err = NotifyFileConfig::parse("[users.default]\nname = \"Desk\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn tokens_are_not_accepted_in_the_file() {
        let err = NotifyFileConfig::parse("[tokens]\nstart_trend = \"abc\"\n");
        assert!(err.is_err());
    }
}
