use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The page could not be retrieved; no partial data is ever returned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("configured {header} '{value}' is not a valid HTTP header value")]
    InvalidHeader { header: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot could not be serialized: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("invalid {role} selector '{css}': {reason}")]
pub struct SelectorError {
    pub role: &'static str,
    pub css: String,
    pub reason: String,
}

/// Why a refresh did not produce a new snapshot.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("fetching the FAQ page failed: {0}")]
    Network(#[from] FetchError),
    #[error("no FAQ data found, the site structure may have changed")]
    NoData,
    #[error("the new snapshot could not be saved: {0}")]
    Cache(#[from] CacheError),
}
