//! Front-end configuration.

use serde::{Deserialize, Serialize};

use crate::dsp::quantizer::PayloadWidth;
use crate::error::{MogSynthError, Result};
use crate::params::SynthParameters;

/// Host-supplied settings, read from JSON (camelCase keys). Every field
/// is optional in the JSON and falls back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Origin serving `/api/getLibraryAddress`.
    pub api_base_url: String,
    /// Preview canvas size in pixels.
    pub preview_width: usize,
    pub preview_height: usize,
    pub payload_width: PayloadWidth,
    /// Parameters the controller starts with.
    pub default_parameters: SynthParameters,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://localhost:3000".to_string(),
            preview_width: 300,
            preview_height: 100,
            payload_width: PayloadWidth::Fixed16,
            default_parameters: SynthParameters::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MogSynthError::invalid_input(format!("invalid config: {e}")))
    }
}
