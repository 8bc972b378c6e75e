// Configuration loading and parsing (scoring.toml, strategy.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::selection::formation::Formation;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringWeights,
    pub strategy: StrategyConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// scoring.toml structs
// ---------------------------------------------------------------------------

/// Every weight used by the metric calculator and the tiered transfer
/// advisor. `Default` holds the stock blend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringWeights {
    pub adjusted_score: AdjustedScoreWeights,
    pub captain_score: CaptainScoreWeights,
    pub advanced_score: AdvancedScoreWeights,
    pub value: ValueSection,
    pub transfers: TransferSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdjustedScoreWeights {
    pub points_total: f64,
    pub points_last_gameweek: f64,
    pub fixture_ease: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptainScoreWeights {
    pub adjusted_score: f64,
    pub fixture_ease: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdvancedScoreWeights {
    pub points_last_gameweek: f64,
    pub fixture_ease: f64,
    pub adjusted_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueSection {
    /// Price substituted for zero or negative prices in value-per-cost.
    pub min_price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferSection {
    /// A tiered candidate counts as an upgrade only above
    /// `upgrade_factor * weakest incumbent score`.
    pub upgrade_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            adjusted_score: AdjustedScoreWeights::default(),
            captain_score: CaptainScoreWeights::default(),
            advanced_score: AdvancedScoreWeights::default(),
            value: ValueSection { min_price: 0.01 },
            transfers: TransferSection {
                upgrade_factor: 1.2,
            },
        }
    }
}

impl Default for AdjustedScoreWeights {
    fn default() -> Self {
        AdjustedScoreWeights {
            points_total: 0.5,
            points_last_gameweek: 0.3,
            fixture_ease: 0.2,
        }
    }
}

impl Default for CaptainScoreWeights {
    fn default() -> Self {
        CaptainScoreWeights {
            adjusted_score: 0.6,
            fixture_ease: 0.4,
        }
    }
}

impl Default for AdvancedScoreWeights {
    fn default() -> Self {
        AdvancedScoreWeights {
            points_last_gameweek: 0.4,
            fixture_ease: 0.3,
            adjusted_score: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    lineup: LineupSection,
    transfers: TransferDefaults,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
struct LineupSection {
    default_formation: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TransferDefaults {
    default_budget: f64,
}

/// The public strategy config assembled from the strategy.toml sections.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub default_formation: Formation,
    pub default_budget: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scoring.toml` and
/// `config/strategy.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- scoring.toml (required) ---
    let scoring_path = config_dir.join("scoring.toml");
    let scoring_text = read_file(&scoring_path)?;
    let scoring: ScoringWeights =
        toml::from_str(&scoring_text).map_err(|e| ConfigError::ParseError {
            path: scoring_path.clone(),
            source: e,
        })?;

    // --- strategy.toml (required) ---
    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy_file: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    let formation_name = strategy_file.lineup.default_formation;
    let default_formation =
        Formation::from_name(&formation_name).ok_or_else(|| ConfigError::ValidationError {
            field: "lineup.default_formation".into(),
            message: format!("unknown formation `{formation_name}`"),
        })?;

    let config = Config {
        scoring,
        strategy: StrategyConfig {
            default_formation,
            default_budget: strategy_file.transfers.default_budget,
        },
        data_paths: strategy_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Files read by `load_config_from`, each seeded from `defaults/`.
const CONFIG_FILES: [&str; 2] = ["scoring.toml", "strategy.toml"];

/// Seed `config/` with whichever stock files it lacks, copied from
/// `defaults/`. Existing files are never overwritten. Returns the files
/// written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    let missing: Vec<&str> = CONFIG_FILES
        .into_iter()
        .filter(|name| !config_dir.join(name).exists() && defaults_dir.join(name).is_file())
        .collect();
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| copy_error("create", &config_dir, e))?;

    let mut copied = Vec::with_capacity(missing.len());
    for name in missing {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        std::fs::copy(&source, &target).map_err(|e| copy_error("copy", &source, e))?;
        info!("seeded {} from {}", target.display(), source.display());
        copied.push(target);
    }
    Ok(copied)
}

fn copy_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("failed to {action} {}: {e}", path.display()),
    }
}

/// Load config relative to `base_dir`, copying defaults first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let s = &config.scoring;
    let weight_fields: &[(&str, f64)] = &[
        ("adjusted_score.points_total", s.adjusted_score.points_total),
        (
            "adjusted_score.points_last_gameweek",
            s.adjusted_score.points_last_gameweek,
        ),
        ("adjusted_score.fixture_ease", s.adjusted_score.fixture_ease),
        ("captain_score.adjusted_score", s.captain_score.adjusted_score),
        ("captain_score.fixture_ease", s.captain_score.fixture_ease),
        (
            "advanced_score.points_last_gameweek",
            s.advanced_score.points_last_gameweek,
        ),
        ("advanced_score.fixture_ease", s.advanced_score.fixture_ease),
        ("advanced_score.adjusted_score", s.advanced_score.adjusted_score),
        ("transfers.upgrade_factor", s.transfers.upgrade_factor),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite number >= 0, got {val}"),
            });
        }
    }

    let min_price = s.value.min_price;
    if !min_price.is_finite() || min_price <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "value.min_price".into(),
            message: format!("must be > 0, got {min_price}"),
        });
    }

    let budget = config.strategy.default_budget;
    if !budget.is_finite() || budget < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "transfers.default_budget".into(),
            message: format!("must be a finite number >= 0, got {budget}"),
        });
    }

    if config.data_paths.roster.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.roster".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
