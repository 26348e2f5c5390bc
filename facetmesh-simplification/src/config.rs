//! Simplification settings

use std::path::PathBuf;

use facetmesh_core::{Error, Result, DEFAULT_DEDUP_COMPLEXITY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyConfig {
    /// Sizes the deduplication filter when the mesh still needs indexing.
    /// Larger values trade memory for fewer linear searches. Must be at least 1.
    pub dedup_complexity: u32,

    /// Write an HTML trace of every merge to this file
    pub dump_path: Option<PathBuf>,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            dedup_complexity: DEFAULT_DEDUP_COMPLEXITY,
            dump_path: None,
        }
    }
}

impl SimplifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dedup_complexity(mut self, complexity: u32) -> Self {
        self.dedup_complexity = complexity;
        self
    }

    #[must_use]
    pub fn with_dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_path = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.dedup_complexity == 0 {
            return Err(Error::InvalidData(
                "Deduplication complexity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimplifyConfig::default();
        assert_eq!(config.dedup_complexity, 2);
        assert!(config.dump_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimplifyConfig::new()
            .with_dedup_complexity(5)
            .with_dump_path("trace.html");
        assert_eq!(config.dedup_complexity, 5);
        assert_eq!(config.dump_path, Some(PathBuf::from("trace.html")));
    }

    #[test]
    fn test_zero_complexity_rejected() {
        let config = SimplifyConfig::new().with_dedup_complexity(0);
        assert!(matches!(config.validate(), Err(Error::InvalidData(_))));
    }
}
