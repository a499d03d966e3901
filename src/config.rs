//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/taxoscope/config.toml` (XDG) or platform config dir
//! 2. Project config: `.taxoscope.toml`
//! 3. Environment variables: `TAXOSCOPE_*`, nested keys separated by `__`
//!    (e.g. `TAXOSCOPE_RENDER__NODE_BUDGET=128`)
//!
//! CLI flags are applied on top of the extracted [`Config`] by each subcommand.
//!
//! # Intended Usage
//!
//! **Project config** (`.taxoscope.toml` next to the data):
//! ```toml
//! [input]
//! taxonomy = "imagenet_tree.json"
//! scores_dir = "weights"
//! policy = "aggregate"
//!
//! [render]
//! node_budget = 512
//! standardize_weights = false
//! format = "html"
//! output = "taxonomy.html"
//! ```
//!
//! Every key has a default, so an empty configuration is valid.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::models::NodeBudget;
use crate::scores::ScorePolicy;
use crate::visualization::OutputFormat;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".taxoscope.toml";

/// Prefix of recognized environment variables.
pub const ENV_PREFIX: &str = "TAXOSCOPE_";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Where the taxonomy and score files come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Taxonomy tree file (JSON).
    pub taxonomy: PathBuf,
    /// Directory scanned for `*.json` score files when `score_files` is empty.
    pub scores_dir: PathBuf,
    /// Explicit score files. Take precedence over `scores_dir`.
    pub score_files: Vec<PathBuf>,
    /// How per-label sub-scores are joined into one score.
    pub policy: ScorePolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            taxonomy: PathBuf::from("imagenet_tree.json"),
            scores_dir: PathBuf::from("weights"),
            score_files: Vec::new(),
            policy: ScorePolicy::default(),
        }
    }
}

/// Graph construction and output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of materialized nodes.
    pub node_budget: NodeBudget,
    /// Re-normalize the raw scores with min-max before coloring.
    pub standardize_weights: bool,
    /// Page title for HTML output.
    pub title: String,
    /// Payload format.
    pub format: OutputFormat,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_budget: NodeBudget::default(),
            standardize_weights: false,
            title: "ImageNet Tree Visualization".to_string(),
            format: OutputFormat::default(),
            output: None,
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::layered(Path::new(PROJECT_CONFIG_FILE)))
    }

    /// Build the layered figment using the given project config file.
    pub fn layered(project_config: &Path) -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        tracing::debug!(
            taxonomy = %config.input.taxonomy.display(),
            policy = ?config.input.policy,
            budget = %config.render.node_budget,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// User config path: ~/.config/taxoscope/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("taxoscope").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("taxoscope").join("config.toml"))
            .unwrap_or_default()
    }
}
