//! Model and scorer provisioning.
//!
//! Resolves release URLs for the engine's published artifacts, keeps them
//! under the user data directory, and downloads whatever is missing. The
//! downloads are blocking; they run from the `fetch-models` binary or from
//! host setup code, never inside an utterance stream.

mod download;

pub use download::{fetch_bundle, fetch_if_missing, is_bundle};

use std::path::{Path, PathBuf};

use crate::error::SttError;

/// Engine release the default paths and URLs point at.
pub const DEFAULT_MODEL_VERSION: &str = "0.9.3";

const RELEASE_BASE_URL: &str = "https://github.com/mozilla/DeepSpeech/releases/download";

/// Graph flavour of the acoustic model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFlavor {
    /// Memory-mapped protobuf graph, the desktop default.
    Pbmm,
    /// TFLite graph for constrained devices.
    TfLite,
}

impl ModelFlavor {
    fn extension(self) -> &'static str {
        match self {
            ModelFlavor::Pbmm => "pbmm",
            ModelFlavor::TfLite => "tflite",
        }
    }
}

/// Release URL of the acoustic model for `version`.
pub fn model_url(version: &str, flavor: ModelFlavor) -> String {
    format!("{RELEASE_BASE_URL}/v{version}/deepspeech-{version}-models.{}", flavor.extension())
}

/// Release URL of the external scorer for `version`.
pub fn scorer_url(version: &str) -> String {
    format!("{RELEASE_BASE_URL}/v{version}/deepspeech-{version}-models.scorer")
}

/// File name the model artifact is stored under locally.
pub fn model_file_name(version: &str, flavor: ModelFlavor) -> String {
    format!("deepspeech-{version}-models.{}", flavor.extension())
}

/// File name the scorer artifact is stored under locally.
pub fn scorer_file_name(version: &str) -> String {
    format!("deepspeech-{version}-models.scorer")
}

/// The local directory model artifacts live in.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map(|dir| dir.join("stt-stream")).unwrap_or_else(|| PathBuf::from("models"))
}

/// Default location of the acoustic model.
pub fn default_model_path(version: &str, flavor: ModelFlavor) -> PathBuf {
    data_dir().join(model_file_name(version, flavor))
}

/// Default location of the external scorer.
pub fn default_scorer_path(version: &str) -> PathBuf {
    data_dir().join(scorer_file_name(version))
}

/// Make sure model and scorer for `version` exist under `dir`, downloading
/// whichever is missing. Returns the two paths.
pub fn ensure_models(dir: &Path, version: &str, flavor: ModelFlavor) -> Result<(PathBuf, PathBuf), SttError> {
    let model = dir.join(model_file_name(version, flavor));
    fetch_if_missing(&model_url(version, flavor), &model)?;

    let scorer = dir.join(scorer_file_name(version));
    fetch_if_missing(&scorer_url(version), &scorer)?;

    Ok((model, scorer))
}
