//! # Asset Worker
//!
//! Static file serving for the deployed viewer. Each request is mapped to a
//! response with:
//!
//! - a `Content-Type` from the file extension,
//! - CORS headers,
//! - a long-lived `Cache-Control` for bundled assets and models and a short
//!   one for documents,
//! - a fallback to the index document for unknown paths, so client-side
//!   routes resolve.
//!
//! ```rust
//! use asset_worker::{AssetRequest, AssetWorker, MemoryAssetStore, WorkerConfig};
//!
//! let store = MemoryAssetStore::new().with_file("/index.html", "<html></html>");
//! let worker = AssetWorker::new(store, WorkerConfig::default());
//!
//! let response = worker.handle(&AssetRequest::get("/some/client/route"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.header("Cache-Control"), Some("public, max-age=3600"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod store;
pub mod worker;

pub use config::{WorkerConfig, WorkerConfigError};
pub use store::{AssetStore, FsAssetStore, MemoryAssetStore, StoreError};
pub use worker::{content_type, AssetRequest, AssetResponse, AssetWorker, Method};
