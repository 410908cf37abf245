//! Crate configuration: tunables of the loudness compressor.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::core::loudness::PHON_HEARING_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoudnessConfig {
    #[serde(default = "LoudnessConfig::default_schwell_factor")]
    pub schwell_factor: f32,
    #[serde(default = "LoudnessConfig::default_compression_level")]
    pub compression_level: f32,
    #[serde(default = "LoudnessConfig::default_hearing_threshold_phon")]
    pub hearing_threshold_phon: f32,
}

impl LoudnessConfig {
    fn default_schwell_factor() -> f32 {
        0.5
    }
    fn default_compression_level() -> f32 {
        0.04
    }
    fn default_hearing_threshold_phon() -> f32 {
        PHON_HEARING_THRESHOLD
    }

    /// Load from a toml file, falling back to defaults on a missing or
    /// unreadable file. When the file does not exist, defaults are
    /// written to it.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("failed to parse config {path}: {err}; using defaults");
                    }
                },
                Err(err) => {
                    warn!("failed to read config {path}: {err}; using defaults");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("failed to write default config to {path}: {err}");
                }
            }
            Err(err) => {
                warn!("failed to serialize default config: {err}");
            }
        }
        default_cfg
    }
}

impl Default for LoudnessConfig {
    fn default() -> Self {
        Self {
            schwell_factor: Self::default_schwell_factor(),
            compression_level: Self::default_compression_level(),
            hearing_threshold_phon: Self::default_hearing_threshold_phon(),
        }
    }
}
