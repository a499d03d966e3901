//! Input options shared by every subcommand.

use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{NodeBudget, TaxonomyNode};
use crate::repositories::TaxonomyRepository;
use crate::scores::ScorePolicy;
use crate::services::{GraphOptions, GraphService};

/// Where to read data from and how to score it. Overrides config values.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Taxonomy tree file (JSON)
    #[arg(short, long)]
    pub taxonomy: Option<PathBuf>,

    /// Directory scanned for *.json score files
    #[arg(long)]
    pub scores_dir: Option<PathBuf>,

    /// Score file; repeat to merge several (later files win)
    #[arg(short = 's', long = "scores")]
    pub score_files: Vec<PathBuf>,

    /// How sub-scores are joined into one score
    #[arg(long, value_enum)]
    pub policy: Option<ScorePolicy>,

    /// Maximum number of rendered nodes, or "unbounded"
    #[arg(short = 'b', long)]
    pub node_budget: Option<NodeBudget>,

    /// Min-max rescale raw scores before coloring
    #[arg(long)]
    pub standardize: bool,
}

impl InputArgs {
    /// Apply CLI overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(taxonomy) = &self.taxonomy {
            config.input.taxonomy = taxonomy.clone();
        }
        if let Some(dir) = &self.scores_dir {
            config.input.scores_dir = dir.clone();
        }
        if !self.score_files.is_empty() {
            config.input.score_files = self.score_files.clone();
        }
        if let Some(policy) = self.policy {
            config.input.policy = policy;
        }
        if let Some(budget) = self.node_budget {
            config.render.node_budget = budget;
        }
        if self.standardize {
            config.render.standardize_weights = true;
        }
    }
}

/// Graph options selected by a config.
pub fn graph_options(config: &Config) -> GraphOptions {
    GraphOptions {
        budget: config.render.node_budget,
        standardize: config.render.standardize_weights,
    }
}

/// Load scores and taxonomy. Any load error aborts before a graph is built.
pub fn load_inputs(config: &Config) -> Result<(GraphService, TaxonomyNode), AppError> {
    let service = GraphService::from_config(&config.input)?;
    let taxonomy = TaxonomyRepository::new(&config.input.taxonomy).load()?;
    Ok((service, taxonomy))
}
