use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::SessionBuilder;
use crate::game::GameVariant;
use crate::logger::RoundLogger;
use crate::pacing::FixedPacing;
use crate::rules::{Bet, MAX_BET, MAX_HANDS, MIN_BET};

pub const CONFIG_ENV: &str = "VIDPOKER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    pub variant: GameVariant,
    pub hands: usize,
    pub starting_bet: u8,
    pub seed: Option<u64>,
    /// Pause between card reveals; 0 disables pacing
    pub reveal_delay_ms: u64,
    /// JSONL file that settled rounds are appended to
    pub history_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::JacksOrBetter,
            hands: 1,
            starting_bet: MIN_BET,
            seed: None,
            reveal_delay_ms: 0,
            history_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub variant: ValueSource,
    pub hands: ValueSource,
    pub starting_bet: ValueSource,
    pub seed: ValueSource,
    pub reveal_delay_ms: ValueSource,
    pub history_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            variant: ValueSource::Default,
            hands: ValueSource::Default,
            starting_bet: ValueSource::Default,
            seed: ValueSource::Default,
            reveal_delay_ms: ValueSource::Default,
            history_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: SessionConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub fn load() -> Result<SessionConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `VIDPOKER_CONFIG`, then individual
/// `VIDPOKER_*` variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = SessionConfig::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.variant {
            cfg.variant = v
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{e}")))?;
            sources.variant = ValueSource::File;
        }
        if let Some(v) = f.hands {
            cfg.hands = v;
            sources.hands = ValueSource::File;
        }
        if let Some(v) = f.starting_bet {
            cfg.starting_bet = v;
            sources.starting_bet = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.reveal_delay_ms {
            cfg.reveal_delay_ms = v;
            sources.reveal_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.history_path {
            cfg.history_path = Some(v);
            sources.history_path = ValueSource::File;
        }
    }

    if let Some(variant) = env_value("VIDPOKER_VARIANT") {
        cfg.variant = variant
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("{e}")))?;
        sources.variant = ValueSource::Env;
    }
    if let Some(hands) = env_value("VIDPOKER_HANDS") {
        cfg.hands = hands
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid hands".into()))?;
        sources.hands = ValueSource::Env;
    }
    if let Some(bet) = env_value("VIDPOKER_BET") {
        cfg.starting_bet = bet
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bet".into()))?;
        sources.starting_bet = ValueSource::Env;
    }
    if let Some(seed) = env_value("VIDPOKER_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(delay) = env_value("VIDPOKER_REVEAL_DELAY_MS") {
        cfg.reveal_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid reveal delay".into()))?;
        sources.reveal_delay_ms = ValueSource::Env;
    }
    if let Some(path) = env_value("VIDPOKER_HISTORY") {
        cfg.history_path = Some(PathBuf::from(path));
        sources.history_path = ValueSource::Env;
    }

    validate(&cfg)?;
    tracing::debug!(?cfg, ?sources, "session config resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    variant: Option<String>,
    #[serde(default)]
    hands: Option<usize>,
    #[serde(default)]
    starting_bet: Option<u8>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    reveal_delay_ms: Option<u64>,
    #[serde(default)]
    history_path: Option<PathBuf>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

pub fn validate(cfg: &SessionConfig) -> Result<(), ConfigError> {
    if cfg.hands == 0 || cfg.hands > MAX_HANDS {
        return Err(ConfigError::Invalid(format!(
            "hands must be between 1 and {MAX_HANDS}, got {}",
            cfg.hands
        )));
    }
    if !(MIN_BET..=MAX_BET).contains(&cfg.starting_bet) {
        return Err(ConfigError::Invalid(format!(
            "starting_bet must be between {MIN_BET} and {MAX_BET}, got {}",
            cfg.starting_bet
        )));
    }
    Ok(())
}

impl SessionBuilder {
    /// Builder carrying every setting of `config`. Opens the history file
    /// when one is configured.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        validate(config)?;
        let bet = Bet::new(config.starting_bet)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let mut builder = SessionBuilder::new(config.variant)
            .hands(config.hands)
            .bet(bet);
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        if config.reveal_delay_ms > 0 {
            builder = builder.pacer(FixedPacing::new(Duration::from_millis(
                config.reveal_delay_ms,
            )));
        }
        if let Some(path) = &config.history_path {
            builder = builder.history(RoundLogger::create(path)?);
        }
        Ok(builder)
    }
}
