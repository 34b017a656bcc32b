//! Worker settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum WorkerConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value the worker cannot serve with
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Static asset worker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Skip edge caching and surface error details
    pub debug: bool,
    /// Document served when a path has no asset (client-side routing)
    pub index_document: String,
    /// Extensions that get the long-lived cache header
    pub asset_extensions: Vec<String>,
    /// `max-age` for asset extensions, in seconds
    pub asset_max_age: u32,
    /// `max-age` for everything else, in seconds
    pub document_max_age: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            index_document: "/index.html".to_string(),
            asset_extensions: ["js", "css", "jpg", "png", "svg", "glb", "gltf"]
                .into_iter()
                .map(String::from)
                .collect(),
            asset_max_age: 31_536_000,
            document_max_age: 3_600,
        }
    }
}

impl WorkerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, WorkerConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| WorkerConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, WorkerConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The index document must be an absolute path
    pub fn validate(&self) -> Result<(), WorkerConfigError> {
        if !self.index_document.starts_with('/') || self.index_document.len() < 2 {
            return Err(WorkerConfigError::Invalid(format!(
                "index_document must be an absolute file path, got '{}'",
                self.index_document
            )));
        }
        if let Some(bad) = self.asset_extensions.iter().find(|ext| ext.is_empty() || ext.contains('.')) {
            return Err(WorkerConfigError::Invalid(format!(
                "asset extensions are listed without dots, got '{bad}'"
            )));
        }
        Ok(())
    }

    /// Whether `extension` gets the long-lived cache header
    pub fn is_asset_extension(&self, extension: &str) -> bool {
        self.asset_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
