//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.kanji-quiz/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::deck::{Deck, FilterCriteria};
use crate::core::item::ReviewState;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub seed_source: Option<String>,
    pub start_address: Option<String>,
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

/// Initial filter applied right after startup. Either list left out means
/// "all of them".
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub levels: Option<Vec<String>>,
    pub states: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SEED_SOURCE: &str = "kanji-collection.json";
pub const DEFAULT_LOG_FILE: &str = "kanji-quiz.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub seed_source: String,
    pub start_address: String,
    pub shuffle_seed: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub initial_filter: Option<FilterConfig>,
    /// Problems found while resolving. They are reported once the logger
    /// exists, since resolving happens before logging is set up.
    pub notices: Vec<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.kanji-quiz/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kanji-quiz").join("config.toml"))
}

/// Load config from `~/.kanji-quiz/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuizConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuizConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuizConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<QuizConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(QuizConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: QuizConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Kanji Quiz Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# seed_source = "kanji-collection.json"   # Path or http(s) URL; or KANJI_QUIZ_SEED
# start_address = "questions/1"           # Or KANJI_QUIZ_START
# shuffle_seed = 42                       # Fixed seed for repeatable shuffles

# [logging]
# file = "kanji-quiz.log"
# level = "debug"                         # "error", "warn", "info", "debug", "trace", "off"

# [filter]
# levels = ["1", "2"]
# states = ["unset", "favorite", "right", "wrong"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_seed` and `cli_start` are from CLI flags (None = not specified).
pub fn resolve(config: &QuizConfig, cli_seed: Option<&str>, cli_start: Option<&str>) -> ResolvedConfig {
    // Seed source: CLI → env → config → default
    let seed_source = cli_seed
        .map(|s| s.to_string())
        .or_else(|| std::env::var("KANJI_QUIZ_SEED").ok())
        .or_else(|| config.general.seed_source.clone())
        .unwrap_or_else(|| DEFAULT_SEED_SOURCE.to_string());

    // Start address: CLI → env → config → "" (start)
    let start_address = cli_start
        .map(|s| s.to_string())
        .or_else(|| std::env::var("KANJI_QUIZ_START").ok())
        .or_else(|| config.general.start_address.clone())
        .unwrap_or_default();

    let mut notices = Vec::new();
    let log_level = match config.logging.level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            notices.push(format!(
                "Unknown log level {:?}, using {}",
                level, DEFAULT_LOG_LEVEL
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    let has_filter = config.filter.levels.is_some() || config.filter.states.is_some();

    ResolvedConfig {
        seed_source,
        start_address,
        shuffle_seed: config.general.shuffle_seed,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        log_level,
        initial_filter: has_filter.then(|| config.filter.clone()),
        notices,
    }
}

impl FilterConfig {
    /// Turn the configured tag lists into criteria against `deck`. Unknown
    /// state tags are skipped with a warning.
    pub fn to_criteria(&self, deck: &Deck) -> FilterCriteria {
        let levels = self.levels.clone().unwrap_or_else(|| deck.levels());
        let states: Vec<ReviewState> = match &self.states {
            Some(tags) => tags
                .iter()
                .filter_map(|tag| match tag.parse::<ReviewState>() {
                    Ok(state) => Some(state),
                    Err(e) => {
                        warn!("Ignoring filter state: {}", e);
                        None
                    }
                })
                .collect(),
            None => ReviewState::ALL.to_vec(),
        };
        FilterCriteria::new(levels, states)
    }
}
