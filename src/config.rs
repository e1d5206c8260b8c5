//! Injection settings - load from JSON with built-in defaults.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added missing-constants policy
//! - 10/17/2026 - Initial implementation

use crate::error::{InjectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Module whose bootstrap gets the response stage.
pub const DEFAULT_TARGET_MODULE: &str = "webwxApp";

/// Emoticon dimension (px) at which a size hint is applied.
pub const DEFAULT_EMOJI_MAX_SIZE: u32 = 120;

pub const DEFAULT_EMOTICON_DIGEST: &str = "[Emoticon]";

pub const DEFAULT_PREVENT_RECALL_MESSAGE: &str = "Message recall prevented";

/// Default config path.
///
/// Tries, in order:
/// 1. WEBWX_INJECT_CONFIG env var
/// 2. ~/.webwx-inject/config.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WEBWX_INJECT_CONFIG") {
        return PathBuf::from(shellexpand::tilde(&path).to_string());
    }

    dirs::home_dir()
        .map(|home| home.join(".webwx-inject").join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// What to do when the foreign app has no type constants to hand out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingConstantsPolicy {
    /// Warn, skip the response stage, still start the module.
    #[default]
    PassThrough,
    /// Refuse to start the module.
    Fail,
}

/// Settings for the interception layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectConfig {
    pub target_module: String,
    pub emoji_max_size: u32,
    pub emoticon_digest: String,
    pub prevent_recall_message: String,
    pub missing_constants: MissingConstantsPolicy,
    pub debug: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            target_module: DEFAULT_TARGET_MODULE.to_string(),
            emoji_max_size: DEFAULT_EMOJI_MAX_SIZE,
            emoticon_digest: DEFAULT_EMOTICON_DIGEST.to_string(),
            prevent_recall_message: DEFAULT_PREVENT_RECALL_MESSAGE.to_string(),
            missing_constants: MissingConstantsPolicy::default(),
            debug: false,
        }
    }
}

impl InjectConfig {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InjectError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&content).map_err(|e| InjectError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Load from the default path, or fall back to built-in defaults when
    /// no file exists there.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// CSS value for the capped dimension, e.g. "120px".
    pub fn max_size_px(&self) -> String {
        format!("{}px", self.emoji_max_size)
    }
}
