use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::NotifyFileConfig;

/// Strategy -> channel routing shipped with the scanner. Channel names are not
/// secret; the tokens behind them are supplied at runtime.
pub const DEFAULT_ROUTING: [(&str, &str); 14] = [
    ("breakout_bar", "start_trend"),
    ("stop_bar", "start_trend"),
    ("reversal_bar", "weakening_trend"),
    ("volume_surge", "volume_surge"),
    ("weak_uptrend", "weakening_trend"),
    ("pin_down", "weakening_trend"),
    ("confluence", "confluence"),
    ("start_bar", "start_trend"),
    ("loaded_bar", "volume_surge"),
    ("test_bar", "weakening_trend"),
    ("consolidation", "start_trend"),
    ("consolidation_breakout", "start_trend"),
    ("channel_breakout", "start_trend"),
    ("hbs_breakout", "confluence"),
];

/// A person who receives alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    /// Opaque recipient id handed to the messaging transport.
    pub chat_id: String,
}

/// Read-only lookup tables the assembler works from.
/// Built once at startup; never mutated after construction.
#[derive(Clone, Default, PartialEq)]
pub struct NotifyTables {
    tokens: HashMap<String, String>,
    users: HashMap<String, UserRecord>,
    routing: HashMap<String, String>,
}

impl NotifyTables {
    /// Empty tables: nothing routed, no users, no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables with the built-in routing and nothing else.
    pub fn with_default_routing() -> Self {
        Self {
            routing: DEFAULT_ROUTING
                .iter()
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Built-in routing overlaid with the file, plus runtime tokens.
    pub fn from_config(file_cfg: &NotifyFileConfig, tokens: HashMap<String, String>) -> Self {
        let mut tables = Self::with_default_routing();
        tables.routing.extend(file_cfg.routing.clone());
        tables.users.extend(file_cfg.users.clone());
        tables.tokens = tokens;

        let mut unresolved: Vec<&str> = tables
            .routing
            .values()
            .map(String::as_str)
            .filter(|c| !tables.tokens.contains_key(*c))
            .collect();
        unresolved.sort_unstable();
        unresolved.dedup();
        for channel in unresolved {
            warn!(channel, "Routed channel has no token; its bundles will carry none");
        }

        tables
    }

    pub fn token(mut self, channel: impl Into<String>, token: impl Into<String>) -> Self {
        self.tokens.insert(channel.into(), token.into());
        self
    }

    pub fn user(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        self.users.insert(
            id.into(),
            UserRecord {
                name: name.into(),
                chat_id: chat_id.into(),
            },
        );
        self
    }

    pub fn route(mut self, strategy: impl Into<String>, channel: impl Into<String>) -> Self {
        self.routing.insert(strategy.into(), channel.into());
        self
    }

    pub fn channel_for(&self, strategy: &str) -> Option<&str> {
        self.routing.get(strategy).map(String::as_str)
    }

    pub fn token_for(&self, channel: &str) -> Option<&str> {
        self.tokens.get(channel).map(String::as_str)
    }

    pub fn user_record(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }

    pub fn chat_id_for(&self, user_id: &str) -> Option<&str> {
        self.users.get(user_id).map(|u| u.chat_id.as_str())
    }

    /// Routed strategy names, sorted.
    pub fn strategies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routing.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for NotifyTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut channels: Vec<&String> = self.tokens.keys().collect();
        channels.sort();
        f.debug_struct("NotifyTables")
            .field("tokens", &channels)
            .field("users", &self.users.len())
            .field("routing", &self.routing.len())
            .finish()
    }
}
