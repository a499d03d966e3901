//! Join policies turning score files into a single raw score table.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::table::ScoreTable;
use crate::error::AppError;
use crate::models::{ConsistencyRecord, ScoreSource, TYPE_1_FIELD, TYPE_2_FIELD, TYPE_3_FIELD};

/// How the sub-scores of a label are joined into one score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Sum of the three text-consistency components, merged across any
    /// number of score files and always min-max normalized.
    #[default]
    Aggregate,
    /// The type-2 component of a single consolidated file, kept raw unless
    /// standardization is requested.
    Single,
}

impl ScorePolicy {
    /// Score of one record, or the name of the first missing field.
    pub fn score(&self, record: &ConsistencyRecord) -> Result<f64, &'static str> {
        match self {
            ScorePolicy::Aggregate => {
                let type_1 = record.type_1.ok_or(TYPE_1_FIELD)?;
                let type_2 = record.type_2.ok_or(TYPE_2_FIELD)?;
                let type_3 = record.type_3.ok_or(TYPE_3_FIELD)?;
                Ok(type_1 + type_2 + type_3)
            }
            ScorePolicy::Single => record.type_2.ok_or(TYPE_2_FIELD),
        }
    }

    /// Whether scores are min-max normalized regardless of the
    /// standardization toggle.
    pub fn always_normalizes(&self) -> bool {
        matches!(self, ScorePolicy::Aggregate)
    }
}

/// A label defined by two different score files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCollision {
    /// Lowercased label.
    pub label: String,
    /// File whose score was replaced.
    pub previous: PathBuf,
    /// File whose score was kept.
    pub current: PathBuf,
}

/// Scores as loaded from disk, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    policy: ScorePolicy,
    table: ScoreTable,
    collisions: Vec<LabelCollision>,
}

impl RawScores {
    /// Merge score sources under `policy`.
    ///
    /// Sources are applied in the given order; a label defined by several
    /// sources takes its score from the last one. Each such collision is
    /// logged and kept in [`RawScores::collisions`]. Case variants of a
    /// label inside one file are not collisions.
    pub fn from_sources(policy: ScorePolicy, sources: &[ScoreSource]) -> Result<Self, AppError> {
        if policy == ScorePolicy::Single && sources.len() != 1 {
            return Err(AppError::Validation(format!(
                "the single score policy needs exactly one score file, got {}",
                sources.len()
            )));
        }

        let mut table = ScoreTable::new();
        let mut origin: HashMap<String, usize> = HashMap::new();
        let mut collisions = Vec::new();

        for (idx, source) in sources.iter().enumerate() {
            for (label, record) in &source.records {
                let score = policy.score(record).map_err(|field| {
                    AppError::malformed(
                        &source.path,
                        format!("label '{}' is missing `{}`", label, field),
                    )
                })?;

                let key = label.to_lowercase();
                if let Some(previous) = origin.insert(key.clone(), idx) {
                    if previous != idx {
                        tracing::warn!(
                            label = %key,
                            previous = %sources[previous].path.display(),
                            current = %source.path.display(),
                            "Label defined by several score files, later file wins"
                        );
                        collisions.push(LabelCollision {
                            label: key.clone(),
                            previous: sources[previous].path.clone(),
                            current: source.path.clone(),
                        });
                    } else {
                        tracing::debug!(
                            label = %key,
                            file = %source.path.display(),
                            "Label repeated with different casing, later entry wins"
                        );
                    }
                }
                table.insert(&key, score);
            }
        }

        tracing::info!(
            policy = ?policy,
            sources = sources.len(),
            labels = table.len(),
            collisions = collisions.len(),
            "Merged score sources"
        );

        Ok(Self {
            policy,
            table,
            collisions,
        })
    }

    /// Wrap an existing table.
    pub fn new(policy: ScorePolicy, table: ScoreTable) -> Self {
        Self {
            policy,
            table,
            collisions: Vec::new(),
        }
    }

    /// Labels overridden by a later score file, in merge order.
    pub fn collisions(&self) -> &[LabelCollision] {
        &self.collisions
    }

    /// The unnormalized table.
    pub fn raw(&self) -> &ScoreTable {
        &self.table
    }

    /// Table used for coloring.
    ///
    /// Always derived from the raw values, so toggling standardization on
    /// and off never compounds.
    pub fn effective(&self, standardize: bool) -> Result<ScoreTable, AppError> {
        if standardize || self.policy.always_normalizes() {
            self.table.min_max_normalized()
        } else {
            Ok(self.table.clone())
        }
    }
}
