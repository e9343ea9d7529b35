//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compare::CompareConfig;
use crate::error::{Result, TabwiseError};
use crate::input::ParserConfig;
use crate::view::ViewConfig;

/// Configuration for ingestion, views, and comparisons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabwiseConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Settings for every view engine the facade creates.
    pub view: ViewConfig,
    /// Settings for every comparison engine the facade creates.
    pub compare: CompareConfig,
}

impl TabwiseConfig {
    /// Load a configuration from a JSON file. Missing sections use defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TabwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.parser.max_rows == Some(0) {
            return Err(TabwiseError::Config(
                "max_rows must be at least 1 when set".to_string(),
            ));
        }
        self.view.validate()?;
        self.compare.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewLayout;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        assert!(TabwiseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = TabwiseConfig {
            view: ViewConfig::default().with_page_size(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TabwiseError::Config(_))));
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"view": {{"layout": {{"mode": "full"}}, "editable": false}}}}"#
        )
        .unwrap();

        let config = TabwiseConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.view.layout, ViewLayout::Full);
        assert!(!config.view.editable);
        assert_eq!(config.compare.left_label, "File 1");
    }
}
