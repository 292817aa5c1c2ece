//! Streaming speech-to-text adapter around a third-party incremental
//! recognition engine.
//!
//! The crate wires a host framework's start/push/stop streaming contract to
//! an external decoder: it watches frame energy and partial decodes to tell
//! when an utterance has ended, ranks the decoder's final hypotheses, and
//! suppresses transcripts the model invents for pure silence. Model
//! artifacts are provisioned over HTTP when missing.
//!
//! The engine itself stays behind [`RecognizerEngine`]; the adapter feeds
//! it samples and consumes its partial and final decodes, nothing more.

pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod plugin;
pub mod stream;

pub use config::PluginConfig;
pub use engine::{Candidate, DecodeSession, EngineCache, RecognizerEngine};
pub use error::SttError;
pub use plugin::{StreamingStt, SttPlugin};
pub use stream::{Transcription, UtteranceStream};
