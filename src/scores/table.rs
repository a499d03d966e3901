//! Case-insensitive label → score mapping.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::TaxonomyNode;

/// Value reported for labels without a score.
///
/// Never a valid normalized score.
pub const MISSING_SCORE: f64 = -1.0;

/// Scores keyed by lowercased label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    scores: HashMap<String, f64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, returning the one it replaced.
    pub fn insert(&mut self, label: &str, score: f64) -> Option<f64> {
        self.scores.insert(label.to_lowercase(), score)
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, label: &str) -> Option<f64> {
        self.scores.get(&label.to_lowercase()).copied()
    }

    /// Case-insensitive lookup with a default for unknown labels.
    pub fn get(&self, label: &str, default: f64) -> f64 {
        self.lookup(label).unwrap_or(default)
    }

    /// Score of a taxonomy node: full name first, then its display label.
    pub fn lookup_node(&self, node: &TaxonomyNode) -> Option<f64> {
        node.score_keys()
            .iter()
            .find_map(|key| self.scores.get(key).copied())
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Smallest and largest score, or `None` for an empty table.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut values = self.scores.values().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }

    /// Min-max scaled copy of this table: `(score - min) / (max - min)`.
    ///
    /// The table itself is left untouched, so rescaling always starts from
    /// the values it was built with. An empty table scales to an empty table.
    pub fn min_max_normalized(&self) -> Result<ScoreTable, AppError> {
        let Some((min, max)) = self.range() else {
            return Ok(ScoreTable::new());
        };

        let width = max - min;
        if width == 0.0 {
            return Err(AppError::DegenerateRange {
                value: min,
                count: self.len(),
            });
        }
        if !width.is_finite() {
            return Err(AppError::Validation(format!(
                "score range [{}, {}] is not finite",
                min, max
            )));
        }

        tracing::debug!(min, max, labels = self.len(), "Min-max normalizing scores");

        let scores = self
            .scores
            .iter()
            .map(|(label, &score)| (label.clone(), (score - min) / width))
            .collect();
        Ok(ScoreTable { scores })
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = ScoreTable::new();
        for (label, score) in iter {
            table.insert(label.as_ref(), score);
        }
        table
    }
}
