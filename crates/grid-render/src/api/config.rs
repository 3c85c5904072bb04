use serde::{Deserialize, Serialize};
use crate::assets::manifest::AssetManifest;
use crate::error::RenderError;

/// Retry policy for image fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    /// Total fetch attempts per image, including the first (default: 1).
    pub max_attempts: u32,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self { max_attempts: 1 }
    }
}

/// Renderer configuration, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Opacity of the background backdrop (default: 0.5).
    pub background_alpha: f64,
    /// Opacity of a zombie in the hit state (default: 0.5).
    pub hit_alpha: f64,
    /// CSS color of the placeholder drawn when assets failed to load.
    pub fallback_color: String,
    /// Fetch retry policy.
    pub load: LoadPolicy,
    /// Image paths.
    pub manifest: AssetManifest,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_alpha: 0.5,
            hit_alpha: 0.5,
            fallback_color: "#ff00ff".into(),
            load: LoadPolicy::default(),
            manifest: AssetManifest::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON string. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}
