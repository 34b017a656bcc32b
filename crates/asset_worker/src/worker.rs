//! Request to response mapping

use std::path::Path;

use percent_encoding::percent_decode_str;

use crate::config::WorkerConfig;
use crate::store::{AssetStore, StoreError};

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// HTTP method of an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch an asset
    Get,
    /// Fetch headers only
    Head,
    /// CORS preflight
    Options,
    /// Anything else
    Other,
}

impl Method {
    /// Parse a method token (case-sensitive, as on the wire)
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Other,
        }
    }
}

/// Incoming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Request method
    pub method: Method,
    /// URL path, possibly with a query string
    pub path: String,
}

impl AssetRequest {
    /// A GET request for `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into() }
    }

    /// Decoded path without query string or fragment; `/` maps to `/index.html`
    ///
    /// Percent escapes are decoded after the query is stripped, so `%3F`
    /// stays part of the file name. Invalid UTF-8 is replaced, not rejected.
    pub fn asset_path(&self) -> String {
        let end = self.path.find(|c: char| c == '?' || c == '#').unwrap_or(self.path.len());
        let path = percent_decode_str(&self.path[..end]).decode_utf8_lossy();
        let path = if path.starts_with('/') { path.into_owned() } else { format!("/{path}") };
        if path.ends_with('/') {
            format!("{path}index.html")
        } else {
            path
        }
    }
}

/// Outgoing response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    /// HTTP status code
    pub status: u16,
    /// Header name/value pairs in insertion order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Vec<u8>,
}

impl AssetResponse {
    fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// First header value with this name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Lower-cased file extension of a request path
fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// MIME type for a file extension
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff2") => "font/woff2",
        Some("wasm") => "application/wasm",
        Some("glb") => "model/gltf-binary",
        Some("gltf") => "model/gltf+json",
        _ => "application/octet-stream",
    }
}

/// Maps requests onto a static asset store
#[derive(Debug)]
pub struct AssetWorker<S: AssetStore> {
    store: S,
    config: WorkerConfig,
}

impl<S: AssetStore> AssetWorker<S> {
    /// Serve `store` with `config`
    pub fn new(store: S, config: WorkerConfig) -> Self {
        Self { store, config }
    }

    /// Settings in use
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    fn cache_control(&self, max_age: u32) -> String {
        if self.config.debug {
            "no-store".to_string()
        } else {
            format!("public, max-age={max_age}")
        }
    }

    /// Produce the response for one request
    pub fn handle(&self, request: &AssetRequest) -> AssetResponse {
        match request.method {
            Method::Get | Method::Head => {}
            Method::Options => {
                let mut response = AssetResponse::new(204, Vec::<u8>::new());
                for (name, value) in CORS_HEADERS {
                    response.set_header(name, value);
                }
                return response;
            }
            Method::Other => {
                let mut response = AssetResponse::new(405, "Method Not Allowed");
                response.set_header("Allow", "GET, HEAD, OPTIONS");
                return response;
            }
        }

        let path = request.asset_path();
        let mut response = match self.store.get(&path) {
            Ok(body) => self.asset_response(&path, body),
            Err(StoreError::NotFound(_)) => self.fallback_response(&path),
            Err(StoreError::Forbidden(_)) => {
                log::warn!("Rejected request outside the asset root: {}", path);
                AssetResponse::new(404, "Not Found")
            }
            Err(error) => {
                log::error!("Failed to serve {}: {}", path, error);
                AssetResponse::new(500, error.to_string())
            }
        };

        if request.method == Method::Head {
            response.body.clear();
        }
        response
    }

    fn asset_response(&self, path: &str, body: Vec<u8>) -> AssetResponse {
        let extension = extension(path);
        let max_age = match extension.as_deref() {
            Some(ext) if self.config.is_asset_extension(ext) => self.config.asset_max_age,
            _ => self.config.document_max_age,
        };

        let mut response = AssetResponse::new(200, body);
        response.set_header("Content-Type", content_type(extension.as_deref()));
        for (name, value) in CORS_HEADERS {
            response.set_header(name, value);
        }
        response.set_header("Cache-Control", self.cache_control(max_age));
        log::debug!("200 {} ({} bytes)", path, response.body.len());
        response
    }

    /// Client-side routing: unknown paths get the index document
    fn fallback_response(&self, path: &str) -> AssetResponse {
        match self.store.get(&self.config.index_document) {
            Ok(body) => {
                log::debug!("{} not found, serving {}", path, self.config.index_document);
                let mut response = AssetResponse::new(200, body);
                response.set_header("Content-Type", "text/html; charset=utf-8");
                response.set_header("Cache-Control", self.cache_control(self.config.document_max_age));
                response
            }
            Err(error) => {
                log::warn!("{} not found and index unavailable: {}", path, error);
                AssetResponse::new(404, "Not Found")
            }
        }
    }
}
