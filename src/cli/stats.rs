//! Stats subcommand - per-depth score distribution.

use clap::Parser;
use color_eyre::Result;

use super::args::{graph_options, load_inputs, InputArgs};
use crate::config::Config;
use crate::services::GraphBuild;

/// Print how scores distribute across tree depths.
#[derive(Parser, Debug)]
pub struct StatsCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

impl StatsCommand {
    /// Run the stats command.
    pub fn run(self, mut config: Config) -> Result<()> {
        self.input.apply(&mut config);

        let (service, taxonomy) = load_inputs(&config)?;
        let build = service.build(&taxonomy, &graph_options(&config))?;

        println!("{}", format_report(&build, taxonomy.node_count()));
        Ok(())
    }
}

/// Plain-text report of a graph build.
pub fn format_report(build: &GraphBuild, taxonomy_nodes: usize) -> String {
    let mut lines = vec![
        format!("taxonomy nodes:   {}", taxonomy_nodes),
        format!("rendered nodes:   {}", build.payload.nodes.len()),
        format!("scored nodes:     {}", build.scored_nodes),
        format!("edges:            {}", build.payload.edges.len()),
        format!("dangling edges:   {}", build.dangling_edges),
        format!("scored labels:    {}", build.scored_labels),
        format!("label collisions: {}", build.label_collisions),
        String::new(),
        format!(
            "{:>5}  {:>7}  {:>8}  {:>8}  {:>8}",
            "depth", "samples", "mean", "min", "max"
        ),
    ];

    let summaries = build.depth_samples.summaries();
    if summaries.is_empty() {
        lines.push("(no scored labels reached)".to_string());
    }
    for summary in summaries {
        lines.push(format!(
            "{:>5}  {:>7}  {:>8.4}  {:>8.4}  {:>8.4}",
            summary.depth, summary.count, summary.mean, summary.min, summary.max
        ));
    }

    lines.join("\n")
}
