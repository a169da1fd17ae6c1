use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Hyper-parameters of the random forest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub n_trees: usize,
    /// Seed for the bootstrap resampling.
    pub seed: u64,
    /// Depth limit per tree; `None` grows every tree until its leaves are pure.
    pub max_depth: Option<usize>,
    /// Columns drawn at random for each split; `None` considers every column.
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            max_features: None,
        }
    }
}

impl ForestConfig {
    /// Reads a TOML file; missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ForestConfig =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero trees, zero depth and zero sampled columns.
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(Error::Config("n_trees must be at least 1".to_string()));
        }
        if self.max_depth == Some(0) {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_features == Some(0) {
            return Err(Error::Config("max_features must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ForestConfig::from_toml_str("n_trees = 10\n").unwrap();
        assert_eq!(config.n_trees, 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_features, None);
    }

    #[test]
    fn reads_per_split_feature_count() {
        let config = ForestConfig::from_toml_str("max_features = 2").unwrap();
        assert_eq!(config.max_features, Some(2));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ForestConfig::from_toml_str("n_trees = 0"),
            Err(Error::Config(_))
        ));
        assert!(ForestConfig::from_toml_str("max_depth = 0").is_err());
        assert!(ForestConfig::from_toml_str("max_features = 0").is_err());
        assert!(ForestConfig::from_toml_str("trees = 3").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7\nmax_depth = 4").unwrap();
        let config = ForestConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.n_trees, 100);
    }
}
