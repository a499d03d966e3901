//! Taxonomy file loading.

use std::path::PathBuf;

use crate::error::AppError;
use crate::models::TaxonomyNode;

/// Repository reading the taxonomy tree from a JSON file.
///
/// Every node must carry an `id` and a string `name`; `children` is
/// optional. Anything else is rejected before traversal starts.
#[derive(Debug, Clone)]
pub struct TaxonomyRepository {
    path: PathBuf,
}

impl TaxonomyRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the taxonomy file.
    pub fn load(&self) -> Result<TaxonomyNode, AppError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        self.parse(&content)
    }

    /// Validate taxonomy JSON read from this repository's file.
    pub fn parse(&self, content: &str) -> Result<TaxonomyNode, AppError> {
        let root: TaxonomyNode = serde_json::from_str(content)
            .map_err(|e| AppError::malformed(&self.path, e.to_string()))?;

        let total = root.node_count();
        let unique = root.unique_ids();
        if unique < total {
            tracing::warn!(
                path = %self.path.display(),
                duplicates = total - unique,
                "Taxonomy repeats node ids, only the first occurrence is rendered"
            );
        }

        tracing::info!(
            path = %self.path.display(),
            nodes = total,
            depth = root.max_depth(),
            "Loaded taxonomy"
        );
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tree() {
        let repo = TaxonomyRepository::new("tree.json");
        let tree = repo
            .parse(r#"{"id": 0, "name": "root", "children": [{"id": 1, "name": "a"}]}"#)
            .unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.children[0].name, "a");
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let repo = TaxonomyRepository::new("tree.json");
        let result = repo.parse(r#"{"id": 0, "name": "root", "children": [{"name": "a"}]}"#);
        match result {
            Err(AppError::MalformedInput { path, reason }) => {
                assert_eq!(path, PathBuf::from("tree.json"));
                assert!(reason.contains("id"), "reason was: {}", reason);
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_name_is_malformed() {
        let repo = TaxonomyRepository::new("tree.json");
        let result = repo.parse(r#"{"id": 0, "name": 42}"#);
        assert!(matches!(result, Err(AppError::MalformedInput { .. })));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let repo = TaxonomyRepository::new("tree.json");
        assert!(matches!(
            repo.parse("{\"id\": 0,"),
            Err(AppError::MalformedInput { .. })
        ));
    }

    /// A chain of `levels` nodes below the root.
    fn nested_tree(levels: usize) -> String {
        let mut json = String::new();
        for id in 0..levels {
            json.push_str(&format!(r#"{{"id": {}, "name": "n", "children": ["#, id));
        }
        json.push_str(&format!(r#"{{"id": {}, "name": "leaf"}}"#, levels));
        json.push_str(&"]}".repeat(levels));
        json
    }

    #[test]
    fn test_nesting_limit() {
        let repo = TaxonomyRepository::new("tree.json");

        let tree = repo.parse(&nested_tree(60)).unwrap();
        assert_eq!(tree.max_depth(), 60);

        // Each level costs an object and an array against serde_json's limit
        assert!(matches!(
            repo.parse(&nested_tree(70)),
            Err(AppError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TaxonomyRepository::new(dir.path().join("absent.json"));
        assert!(matches!(repo.load(), Err(AppError::Io { .. })));
    }
}
