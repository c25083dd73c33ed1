//! Runtime settings.
//!
//! Sources, later ones winning: `config/dohaeris.toml` (or `--config`),
//! `DOHAERIS_*` environment variables (`__` separates nested keys, e.g.
//! `DOHAERIS_AI__MODEL`), command-line flags.

use clap::{Parser, Subcommand};
use engine::Currency;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/dohaeris.toml";
const ENV_PREFIX: &str = "DOHAERIS";
/// Read when no key is configured under `ai.api_key`.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for every crate of the workspace.
    pub level: String,
    pub currency: Currency,
    pub json: bool,
    pub ai: Ai,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::Brl,
            json: false,
            ai: Ai::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ai {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// `0` disables the request timeout.
    pub timeout_secs: u64,
}

impl Default for Ai {
    fn default() -> Self {
        Self {
            api_key: None,
            model: advisor::DEFAULT_MODEL.to_string(),
            base_url: advisor::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "dohaeris", version, about = "Personal finance dashboard")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override display currency (BRL, USD, GBP).
    #[arg(long, global = true)]
    currency: Option<Currency>,
    /// Print views as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Override log level (e.g. debug).
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Monthly totals, savings rate and goals.
    Dashboard,
    /// Expenses by category and tag, with tag budgets.
    Expenses,
    /// Shopping trips and pending costs.
    Shopping,
    /// Savings goals progress.
    Goals,
    /// Assets and their share of patrimony.
    Patrimony,
    /// AI-generated advice on the current snapshot.
    Insight,
}

pub fn load() -> Result<(Settings, Command)> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<(Settings, Command)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    );
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if args.json {
        settings.json = true;
    }
    if let Some(level) = args.log_level {
        settings.level = level;
    }
    if settings.ai.api_key.is_none() {
        settings.ai.api_key = std::env::var(API_KEY_ENV).ok();
    }

    Ok((settings, args.command.unwrap_or(Command::Dashboard)))
}
