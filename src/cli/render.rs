//! Render subcommand - write the scored graph for a viewer.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;

use super::args::{graph_options, load_inputs, InputArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::visualization::{renderer_for, OutputFormat};

/// Build the graph and write it as an HTML page, JSON or TOON payload.
#[derive(Parser, Debug)]
pub struct RenderCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page title for HTML output
    #[arg(long)]
    pub title: Option<String>,
}

impl RenderCommand {
    /// Run the render command.
    pub fn run(self, mut config: Config) -> Result<()> {
        self.apply(&mut config);

        let (service, taxonomy) = load_inputs(&config)?;
        let build = service.build(&taxonomy, &graph_options(&config))?;

        let renderer = renderer_for(config.render.format, &config.render.title);
        let document = renderer.render(&build.payload)?;
        write_output(&document, config.render.output.as_deref())?;

        let destination = config
            .render
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        tracing::info!(format = ?config.render.format, output = %destination, "Rendered graph");
        Ok(())
    }

    fn apply(&self, config: &mut Config) {
        self.input.apply(config);
        if let Some(format) = self.format {
            config.render.format = format;
        }
        if let Some(output) = &self.output {
            config.render.output = Some(output.clone());
        }
        if let Some(title) = &self.title {
            config.render.title = title.clone();
        }
    }
}

/// Write a rendered document to a file, or stdout when no path is given.
pub fn write_output(document: &str, path: Option<&Path>) -> Result<(), AppError> {
    match path {
        Some(path) => std::fs::write(path, document).map_err(|e| AppError::io(path, e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .and_then(|_| stdout.flush())
                .map_err(|e| AppError::io("<stdout>", e))
        }
    }
}
