//! Error types for the renderer.

use thiserror::Error;

/// Errors surfaced by renderer construction and configuration.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface could not produce a 2D context.
    #[error("drawing surface has no 2D context")]
    NoContext,

    /// Configuration JSON failed to parse.
    #[error("invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// A single image resource failed to load.
#[derive(Debug, Clone, Error)]
#[error("failed to load image '{path}': {reason}")]
pub struct LoadError {
    pub path: String,
    pub reason: String,
}

impl LoadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
