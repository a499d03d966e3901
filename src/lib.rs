//! Taxoscope - Taxonomy Score Graph
//!
//! Loads a label hierarchy and per-label consistency scores, then renders
//! the hierarchy as a graph whose nodes are colored by score.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod scores;
pub mod services;
pub mod visualization;
