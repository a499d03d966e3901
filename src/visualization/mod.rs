//! Graph Visualization Module
//!
//! Turns traversal output into something a graph viewer can draw.
//!
//! ## Module Structure
//!
//! - `color` - Score to color mapping
//! - `assembler` - Payload assembly (colored nodes, `{from, to}` edges)
//! - `render` - Output adapters (HTML page, JSON, TOON)
//! - `constants` - Colors, sizes and layout settings

mod assembler;
mod color;
pub mod constants;
mod render;

pub use assembler::GraphAssembler;
pub use color::{rgb_hex, ColorMapper, RedGreenScale};
pub use render::{
    renderer_for, HtmlRenderer, JsonRenderer, OutputFormat, RenderAdapter, ToonRenderer,
};
