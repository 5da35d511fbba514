use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the sorter backend.
/// Every module returns `Result<T, SorterError>`.
#[derive(Debug, Error)]
pub enum SorterError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lookup failed for {url}: HTTP {status}")]
    LookupFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Input ───────────────────────────────────────────
    #[error("Not a mods directory: {0:?}")]
    InvalidModsDir(PathBuf),
}

/// Convenience alias used throughout the crate.
pub type SorterResult<T> = Result<T, SorterError>;
