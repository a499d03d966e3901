//! Score tables: merging score files, lookup and normalization.

mod policy;
mod table;

pub use policy::{LabelCollision, RawScores, ScorePolicy};
pub use table::{ScoreTable, MISSING_SCORE};
