use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use common::config::DEFAULT_USER;

use crate::tables::NotifyTables;

/// Where one strategy's alerts go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Token of the routed channel. `None` when the channel has no token.
    pub token: Option<String>,
    /// Recipient ids in the order the users were requested.
    pub chat_ids: Vec<String>,
}

impl Bundle {
    /// Copy with the token masked, for printing.
    pub fn redacted(&self) -> Bundle {
        Bundle {
            token: self.token.as_ref().map(|_| "***".to_string()),
            chat_ids: self.chat_ids.clone(),
        }
    }
}

/// Strategy -> bundle, in first-insertion order.
/// Serializes as a JSON/TOML map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleMap {
    entries: Vec<(String, Bundle)>,
}

impl BundleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, strategy: String, bundle: Bundle) {
        match self.entries.iter_mut().find(|(name, _)| *name == strategy) {
            Some((_, existing)) => *existing = bundle,
            None => self.entries.push((strategy, bundle)),
        }
    }

    pub fn get(&self, strategy: &str) -> Option<&Bundle> {
        self.entries
            .iter()
            .find(|(name, _)| name == strategy)
            .map(|(_, bundle)| bundle)
    }

    pub fn contains(&self, strategy: &str) -> bool {
        self.get(strategy).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bundle)> {
        self.entries.iter().map(|(name, bundle)| (name.as_str(), bundle))
    }

    pub fn redacted(&self) -> BundleMap {
        BundleMap {
            entries: self
                .entries
                .iter()
                .map(|(name, bundle)| (name.clone(), bundle.redacted()))
                .collect(),
        }
    }
}

impl Serialize for BundleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bundle) in &self.entries {
            map.serialize_entry(name, bundle)?;
        }
        map.end()
    }
}

/// Build the per-strategy notification bundles.
///
/// Lookups are permissive: a strategy with no route is left out, a channel
/// with no token yields `token: None`, and unknown user ids are skipped.
/// A strategy whose users all turned out unknown still gets an entry with an
/// empty recipient list. Never fails.
pub fn assemble<S, U>(tables: &NotifyTables, strategies: &[S], users: &[U]) -> BundleMap
where
    S: AsRef<str>,
    U: AsRef<str>,
{
    let mut result = BundleMap::new();

    for strategy in strategies {
        let strategy = strategy.as_ref();
        let Some(channel) = tables.channel_for(strategy) else {
            debug!(strategy, "No channel routed; skipping");
            continue;
        };

        let token = tables.token_for(channel).map(str::to_string);
        if token.is_none() {
            debug!(strategy, channel, "Channel has no token");
        }

        let chat_ids: Vec<String> = users
            .iter()
            .filter_map(|user| {
                let user = user.as_ref();
                let chat_id = tables.chat_id_for(user);
                if chat_id.is_none() {
                    debug!(strategy, user, "Unknown user; skipping");
                }
                chat_id.map(str::to_string)
            })
            .collect();

        result.insert(strategy.to_string(), Bundle { token, chat_ids });
    }

    result
}

/// [`assemble`] for the default user only.
pub fn assemble_default<S: AsRef<str>>(tables: &NotifyTables, strategies: &[S]) -> BundleMap {
    assemble(tables, strategies, &[DEFAULT_USER])
}
