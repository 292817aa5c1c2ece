//! Error types for the streaming STT adapter.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the host framework.
///
/// Recognizer failures are fatal for the current utterance only; the plugin
/// itself stays usable and a new stream can be started afterwards.
#[derive(Debug, Error)]
pub enum SttError {
    /// The acoustic model file is missing. Raised at construction time,
    /// before any stream is started.
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    /// The plugin configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An audio chunk did not contain a whole number of 16-bit samples.
    #[error("audio chunk of {0} bytes is not a whole number of 16-bit samples")]
    UnalignedChunk(usize),

    /// A stream operation was attempted with no active stream.
    #[error("no active stream")]
    NoActiveStream,

    /// The utterance worker went away without reporting a result.
    #[error("utterance stream terminated without a result")]
    StreamClosed,

    /// The recognizer engine reported an error during feed, decode, or
    /// finalization. Not retried.
    #[error("recognizer error: {0}")]
    Engine(#[source] anyhow::Error),

    /// A model artifact download failed.
    #[error("download failed for {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
