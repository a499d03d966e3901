//! Per-label score records as they appear in score files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// JSON key of the first text-consistency component.
pub const TYPE_1_FIELD: &str = "type_1_text_consistency_score";
/// JSON key of the second text-consistency component.
pub const TYPE_2_FIELD: &str = "type_2_text_consistency_score";
/// JSON key of the third text-consistency component.
pub const TYPE_3_FIELD: &str = "type_3_text_consistency_score";

/// Text-consistency sub-scores of one label from one scoring run.
///
/// Fields are optional at this level; which ones are required depends on
/// the join policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyRecord {
    #[serde(rename = "type_1_text_consistency_score", default)]
    pub type_1: Option<f64>,
    #[serde(rename = "type_2_text_consistency_score", default)]
    pub type_2: Option<f64>,
    #[serde(rename = "type_3_text_consistency_score", default)]
    pub type_3: Option<f64>,
}

impl ConsistencyRecord {
    /// Record with all three components set.
    pub fn new(type_1: f64, type_2: f64, type_3: f64) -> Self {
        Self {
            type_1: Some(type_1),
            type_2: Some(type_2),
            type_3: Some(type_3),
        }
    }
}

/// All records of one score file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSource {
    /// File the records were read from.
    pub path: PathBuf,
    /// `(label, record)` pairs with labels as written in the file.
    pub records: Vec<(String, ConsistencyRecord)>,
}

impl ScoreSource {
    pub fn new(path: impl Into<PathBuf>, records: Vec<(String, ConsistencyRecord)>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_are_ignored() {
        let json = r#"{
            "type_1_text_consistency_score": 0.1,
            "type_2_text_consistency_score": 0.2,
            "type_3_text_consistency_score": 0.3,
            "num_samples": 50
        }"#;
        let record: ConsistencyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ConsistencyRecord::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let record: ConsistencyRecord =
            serde_json::from_str(r#"{"type_2_text_consistency_score": 4.0}"#).unwrap();
        assert_eq!(record.type_1, None);
        assert_eq!(record.type_2, Some(4.0));
        assert_eq!(record.type_3, None);
    }
}
