//! Score file discovery and loading.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::InputConfig;
use crate::error::AppError;
use crate::models::{ConsistencyRecord, ScoreSource};

/// Repository reading label → sub-score records from JSON files.
///
/// Explicit files are used as given; otherwise every `*.json` file of the
/// score directory is a source, in file-name order.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    scores_dir: PathBuf,
    score_files: Vec<PathBuf>,
}

impl ScoreRepository {
    pub fn new(scores_dir: impl Into<PathBuf>, score_files: Vec<PathBuf>) -> Self {
        Self {
            scores_dir: scores_dir.into(),
            score_files,
        }
    }

    pub fn from_config(input: &InputConfig) -> Self {
        Self::new(input.scores_dir.clone(), input.score_files.clone())
    }

    /// Files to read, in merge order.
    pub fn source_paths(&self) -> Result<Vec<PathBuf>, AppError> {
        if !self.score_files.is_empty() {
            return Ok(self.score_files.clone());
        }

        let entries = std::fs::read_dir(&self.scores_dir)
            .map_err(|e| AppError::io(&self.scores_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| AppError::io(&self.scores_dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(AppError::Validation(format!(
                "no score files (*.json) found in {}",
                self.scores_dir.display()
            )));
        }
        Ok(paths)
    }

    /// Read every source file.
    pub fn load_sources(&self) -> Result<Vec<ScoreSource>, AppError> {
        self.source_paths()?
            .iter()
            .map(|path| Self::load_file(path))
            .collect()
    }

    /// Read one score file.
    pub fn load_file(path: &Path) -> Result<ScoreSource, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let source = Self::parse(path, &content)?;
        tracing::info!(
            path = %path.display(),
            labels = source.records.len(),
            "Loaded score file"
        );
        Ok(source)
    }

    /// Parse a score file: a JSON object of label → record objects.
    pub fn parse(path: &Path, content: &str) -> Result<ScoreSource, AppError> {
        let object: Map<String, Value> = serde_json::from_str(content)
            .map_err(|e| AppError::malformed(path, e.to_string()))?;

        let records = object
            .into_iter()
            .map(|(label, value)| {
                if !value.is_object() {
                    return Err(AppError::malformed(
                        path,
                        format!("label '{}' is not mapped to an object", label),
                    ));
                }
                serde_json::from_value::<ConsistencyRecord>(value)
                    .map(|record| (label.clone(), record))
                    .map_err(|e| AppError::malformed(path, format!("label '{}': {}", label, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScoreSource::new(path, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "type_1_text_consistency_score": 0.1,
        "type_2_text_consistency_score": 0.2,
        "type_3_text_consistency_score": 0.3
    }"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let content = format!(r#"{{"zebra": {0}, "Dog": {0}, "apple": {0}}}"#, RECORD);
        let source = ScoreRepository::parse(Path::new("s.json"), &content).unwrap();
        let labels: Vec<&str> = source.records.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["zebra", "Dog", "apple"]);
        assert_eq!(source.records[1].1, ConsistencyRecord::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let result = ScoreRepository::parse(Path::new("s.json"), "[1, 2, 3]");
        assert!(matches!(result, Err(AppError::MalformedInput { .. })));
    }

    #[test]
    fn test_parse_rejects_non_object_record() {
        let result = ScoreRepository::parse(Path::new("s.json"), r#"{"dog": 0.5}"#);
        match result {
            Err(AppError::MalformedInput { reason, .. }) => assert!(reason.contains("dog")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let result = ScoreRepository::parse(
            Path::new("s.json"),
            r#"{"dog": {"type_2_text_consistency_score": "high"}}"#,
        );
        assert!(matches!(result, Err(AppError::MalformedInput { .. })));
    }

    #[test]
    fn test_directory_scan_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let repo = ScoreRepository::new(dir.path(), Vec::new());
        let paths = repo.source_paths().unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.json"), dir.path().join("b.json")]
        );
    }

    #[test]
    fn test_explicit_files_take_precedence() {
        let repo = ScoreRepository::new(
            "does-not-exist",
            vec![PathBuf::from("z.json"), PathBuf::from("a.json")],
        );
        assert_eq!(
            repo.source_paths().unwrap(),
            vec![PathBuf::from("z.json"), PathBuf::from("a.json")]
        );
    }

    #[test]
    fn test_empty_directory_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ScoreRepository::new(dir.path(), Vec::new());
        assert!(matches!(
            repo.source_paths(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ScoreRepository::new(dir.path().join("weights"), Vec::new());
        assert!(matches!(repo.source_paths(), Err(AppError::Io { .. })));
    }
}
