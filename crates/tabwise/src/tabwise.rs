//! Main Tabwise struct and public API.

use std::path::Path;
use std::sync::Arc;

use crate::compare::ComparisonEngine;
use crate::config::TabwiseConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::input::Parser;
use crate::view::ViewEngine;

/// Entry point tying ingestion to the view and comparison engines.
pub struct Tabwise {
    config: TabwiseConfig,
    parser: Parser,
}

impl Default for Tabwise {
    fn default() -> Self {
        Self::new()
    }
}

impl Tabwise {
    /// Create a Tabwise instance with default configuration.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            config: TabwiseConfig::default(),
        }
    }

    /// Create a Tabwise instance with custom configuration.
    pub fn with_config(config: TabwiseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: Parser::with_config(config.parser.clone()),
            config,
        })
    }

    pub fn config(&self) -> &TabwiseConfig {
        &self.config
    }

    /// Load a delimited file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>> {
        self.parser.parse_file(path).map(Arc::new)
    }

    /// Load delimited text already in memory.
    pub fn load_bytes(&self, bytes: &[u8], source_name: &str) -> Result<Arc<Dataset>> {
        self.parser.parse_bytes(bytes, source_name).map(Arc::new)
    }

    /// A view engine over `dataset` using the configured view settings.
    pub fn view(&self, dataset: Arc<Dataset>) -> ViewEngine {
        ViewEngine::with_config(dataset, self.config.view.clone())
    }

    /// A comparison engine over two datasets using the configured labels.
    pub fn compare(&self, left: Arc<Dataset>, right: Arc<Dataset>) -> ComparisonEngine {
        ComparisonEngine::with_config(left, right, self.config.compare.clone())
    }
}
