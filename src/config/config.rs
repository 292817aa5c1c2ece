//! Plugin configuration and validation.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SttError;
use crate::models::{self, ModelFlavor};

/// Streaming STT plugin configuration.
///
/// All fields have defaults, so a host can pass an empty config block and
/// get a working English setup pointing at the default artifact locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Language used when the host does not pass one per stream.
    pub lang: String,

    /// Sample rate of the PCM chunks the host pushes, in Hz.
    pub sample_rate: u32,

    /// Acoustic model file.
    pub model_path: PathBuf,

    /// Optional external scorer. Decoding works without one, with worse
    /// candidate ranking.
    pub scorer_path: Option<PathBuf>,

    /// Decoder threads, 0 = auto-detect from CPU cores.
    pub decoder_threads: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            sample_rate: 16000,
            model_path: models::default_model_path(models::DEFAULT_MODEL_VERSION, ModelFlavor::Pbmm),
            scorer_path: Some(models::default_scorer_path(models::DEFAULT_MODEL_VERSION)),
            decoder_threads: 0,
        }
    }
}

impl PluginConfig {
    /// Parse a host-supplied JSON config block. Missing keys fall back to
    /// the defaults; unknown keys are ignored.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SttError> {
        serde_json::from_value(value).map_err(|e| SttError::Config(e.to_string()))
    }

    /// Validate the configuration.
    ///
    /// A missing model file is fatal; a missing scorer only degrades
    /// ranking and is reported as a warning.
    pub fn validate(&self) -> Result<(), SttError> {
        if self.sample_rate == 0 {
            return Err(SttError::Config("sample_rate must be non-zero".to_string()));
        }

        if !self.model_path.is_file() {
            return Err(SttError::ModelNotFound(self.model_path.clone()));
        }

        match &self.scorer_path {
            Some(path) if !path.is_file() => {
                warn!("scorer not found at {}, decoding without one", path.display());
            }
            Some(path) => {
                info!("using external scorer {}", path.display());
            }
            None => {}
        }

        Ok(())
    }

    /// Decoder thread count with 0 resolved from the CPU count. Leaves
    /// headroom for the host's own work rather than grabbing every core.
    pub fn effective_decoder_threads(&self) -> usize {
        if self.decoder_threads != 0 {
            self.decoder_threads
        } else {
            (num_cpus::get() / 3).max(1)
        }
    }
}
