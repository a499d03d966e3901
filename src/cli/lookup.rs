//! Lookup subcommand - effective score of individual labels.

use clap::Parser;
use color_eyre::Result;

use super::args::{graph_options, InputArgs};
use crate::config::Config;
use crate::scores::ScoreTable;
use crate::services::GraphService;

/// Print the effective and raw score of each label (case-insensitive) or `n/a`.
#[derive(Parser, Debug)]
pub struct LookupCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Labels to look up
    #[arg(required = true)]
    pub labels: Vec<String>,
}

impl LookupCommand {
    /// Run the lookup command.
    pub fn run(self, mut config: Config) -> Result<()> {
        self.input.apply(&mut config);

        let service = GraphService::from_config(&config.input)?;
        let table = service.score_table(&graph_options(&config))?;

        for line in format_lookups(&table, service.raw_scores().raw(), &self.labels) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// One `label<TAB>effective<TAB>raw=score` line per label.
pub fn format_lookups(table: &ScoreTable, raw: &ScoreTable, labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|label| match (table.lookup(label), raw.lookup(label)) {
            (Some(score), Some(raw_score)) => {
                format!("{}\t{:.6}\traw={:.6}", label, score, raw_score)
            }
            _ => format!("{}\tn/a", label),
        })
        .collect()
}
