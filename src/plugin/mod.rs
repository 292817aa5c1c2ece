//! Host framework plugin surface.
//!
//! Implements the host's streaming speech-to-text contract on top of the
//! utterance session loop.

mod streaming;

pub use streaming::{StreamingStt, SttPlugin};
