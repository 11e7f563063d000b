use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::Config;
use notify::{assemble, NotifyFileConfig, NotifyTables};
use strategy::{volume, BarPattern, ParamValue, PresetFileConfig, PresetRegistry};

/// Inspect VSA strategy presets and notification routing.
#[derive(Debug, Parser)]
#[command(name = "vsa-config", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print parameter presets as JSON
    Presets {
        /// Only this variant (e.g. breakout_bar)
        #[arg(long)]
        name: Option<String>,
    },
    /// Print per-strategy notification bundles as JSON
    Notify {
        /// Comma-separated strategy names
        #[arg(long, value_delimiter = ',', required = true)]
        strategies: Vec<String>,
        /// Comma-separated user ids (defaults to NOTIFY_USERS or "default")
        #[arg(long, value_delimiter = ',')]
        users: Vec<String>,
        /// Print tokens instead of masking them
        #[arg(long)]
        show_tokens: bool,
    },
    /// Print the minimum USD volume for a timeframe
    VolumeThreshold {
        /// Timeframe label, e.g. 1d or 4h
        timeframe: String,
    },
}

fn main() -> Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    // stderr only, stdout carries the JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("failed to load configuration")?;
    info!(channels = cfg.channel_tokens.len(), "vsa-config starting");

    match cli.command {
        Command::Presets { name } => {
            let registry = load_registry(&cfg)?;
            let mut out: BTreeMap<&str, BTreeMap<&str, ParamValue>> = BTreeMap::new();
            match name {
                Some(name) => {
                    let pattern: BarPattern = name.parse()?;
                    out.insert(pattern.name(), registry.get(pattern).to_map());
                }
                None => {
                    for (pattern, preset) in registry.iter() {
                        out.insert(pattern.name(), preset.to_map());
                    }
                }
            }
            print_json(&out)?;
        }
        Command::Notify {
            strategies,
            users,
            show_tokens,
        } => {
            let tables = load_tables(&cfg)?;
            let users = if users.is_empty() {
                cfg.default_users.clone()
            } else {
                users
            };
            let skipped = unrouted(&tables, &strategies);
            if !skipped.is_empty() {
                warn!(strategies = ?skipped, "No channel routed; these strategies are not notified");
            }
            let bundles = assemble(&tables, &strategies, &users);
            if show_tokens {
                print_json(&bundles)?;
            } else {
                print_json(&bundles.redacted())?;
            }
        }
        Command::VolumeThreshold { timeframe } => {
            println!("{}", volume::min_volume_usd_for(&timeframe));
        }
    }

    Ok(())
}

fn load_registry(cfg: &Config) -> Result<PresetRegistry> {
    match &cfg.preset_config_path {
        Some(path) => {
            let file = PresetFileConfig::load(path)
                .with_context(|| format!("failed to read preset file '{path}'"))?;
            Ok(PresetRegistry::with_file(&file)?)
        }
        None => Ok(PresetRegistry::builtin()),
    }
}

fn load_tables(cfg: &Config) -> Result<NotifyTables> {
    let path = Path::new(&cfg.notify_config_path);
    let file = if path.exists() {
        NotifyFileConfig::load(path)
            .with_context(|| format!("failed to read notification file '{}'", path.display()))?
    } else {
        warn!(path = %path.display(), "Notification file not found; no users configured");
        NotifyFileConfig::default()
    };
    Ok(NotifyTables::from_config(&file, cfg.channel_tokens.clone()))
}

/// Requested strategies with no route, in request order.
fn unrouted<'a>(tables: &NotifyTables, strategies: &'a [String]) -> Vec<&'a str> {
    strategies
        .iter()
        .map(String::as_str)
        .filter(|s| tables.channel_for(s).is_none())
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
