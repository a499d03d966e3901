//! File access layer.
//!
//! Repositories read the taxonomy and score files and validate them at the
//! load boundary, so everything downstream works on well-formed data.

mod scores;
mod taxonomy;

pub use scores::ScoreRepository;
pub use taxonomy::TaxonomyRepository;
