//! Asset storage backends

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Asset lookup errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No asset at this path
    #[error("could not find asset at {0}")]
    NotFound(String),

    /// The path escapes the asset root
    #[error("path not allowed: {0}")]
    Forbidden(String),

    /// Reading the asset failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value view of the deployed static files
pub trait AssetStore {
    /// Bytes stored under `path` (absolute, `/`-separated)
    fn get(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}

/// Serves files below a directory
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Serve files below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory being served
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StoreError::Forbidden(path.to_string()));
                }
            }
        }
        Ok(resolved)
    }
}

impl AssetStore for FsAssetStore {
    fn get(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let file = self.resolve(path)?;
        if !file.is_file() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        match std::fs::read(&file) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(path.to_string())),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// In-memory store, keyed by absolute path
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), body.into());
        self
    }
}

impl AssetStore for MemoryAssetStore {
    fn get(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}
