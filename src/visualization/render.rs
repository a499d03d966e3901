//! Render adapters turning a payload into an output document.

use serde::{Deserialize, Serialize};
use html_escape::encode_text;
use serde_json::json;

use super::constants::{
    CANVAS_HEIGHT_PX, EDGE_WIDTH, LAYOUT_DIRECTION, LAYOUT_SORT_METHOD, LEGEND, NODE_FONT_SIZE,
    NODE_SHAPE,
};
use crate::error::AppError;
use crate::models::GraphPayload;

const HTML_TEMPLATE: &str = include_str!("template.html");

/// Output format for rendered graphs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Standalone HTML page with an interactive hierarchical view (default).
    #[default]
    Html,
    /// The `{nodes, edges}` payload as JSON.
    Json,
    /// TOON (Token-Oriented Object Notation) - compact payload.
    Toon,
}

/// Consumes a payload and produces the document handed to the viewer.
pub trait RenderAdapter {
    fn render(&self, payload: &GraphPayload) -> Result<String, AppError>;
}

/// Pretty-printed JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl RenderAdapter for JsonRenderer {
    fn render(&self, payload: &GraphPayload) -> Result<String, AppError> {
        serde_json::to_string_pretty(payload).map_err(|e| AppError::Render(e.to_string()))
    }
}

/// TOON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToonRenderer;

impl RenderAdapter for ToonRenderer {
    fn render(&self, payload: &GraphPayload) -> Result<String, AppError> {
        serde_toon::to_string(payload)
            .map_err(|e| AppError::Render(format!("TOON serialization error: {}", e)))
    }
}

/// vis-network page laid out left to right.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Renderer configuration passed to `vis.Network`.
    pub fn network_options() -> serde_json::Value {
        json!({
            "layout": {
                "hierarchical": {
                    "enabled": true,
                    "direction": LAYOUT_DIRECTION,
                    "sortMethod": LAYOUT_SORT_METHOD,
                }
            },
            "nodes": {
                "shape": NODE_SHAPE,
                "font": { "size": NODE_FONT_SIZE },
            },
            "edges": { "width": EDGE_WIDTH },
        })
    }
}

impl RenderAdapter for HtmlRenderer {
    fn render(&self, payload: &GraphPayload) -> Result<String, AppError> {
        let title = encode_text(&self.title).into_owned();
        let height = CANVAS_HEIGHT_PX.to_string();
        let node_count = payload.nodes.len().to_string();
        let edge_count = payload.edges.len().to_string();
        let nodes = script_json(&payload.nodes)?;
        let edges = script_json(&payload.edges)?;
        let options = script_json(&Self::network_options())?;

        Ok(fill_template(
            HTML_TEMPLATE,
            &[
                ("__TITLE__", title.as_str()),
                ("__HEIGHT__", height.as_str()),
                ("__NODE_COUNT__", node_count.as_str()),
                ("__EDGE_COUNT__", edge_count.as_str()),
                ("__LEGEND__", LEGEND),
                ("__OPTIONS__", options.as_str()),
                ("__NODES__", nodes.as_str()),
                ("__EDGES__", edges.as_str()),
            ],
        ))
    }
}

/// Adapter for an output format.
pub fn renderer_for(format: OutputFormat, title: &str) -> Box<dyn RenderAdapter> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(title)),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Toon => Box::new(ToonRenderer),
    }
}

/// JSON safe to embed in a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|e| AppError::Render(e.to_string()))
}

/// Substitute placeholders in a single pass over `template`.
///
/// Inserted values are never scanned again, so data containing a
/// placeholder name is emitted verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|&(key, value)| rest.find(key).map(|at| (at, key, value)))
            .min_by_key(|&(at, _, _)| at);

        match next {
            Some((at, key, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
