//! Recognizer engine abstraction.
//!
//! The decode engine is an external collaborator. The stream loop consumes
//! exactly this surface: create a session, feed samples, read the partial
//! decode, and finalize into ranked candidates. Engine failures propagate
//! untouched; the adapter never retries.

mod cache;

#[cfg(test)]
pub(crate) mod scripted;

pub use cache::EngineCache;

use anyhow::Result;

/// Number of ranked hypotheses requested when a decode session is closed.
pub const MAX_CANDIDATES: usize = 5;

/// A loaded recognizer model, shared across utterances for one language.
///
/// Engines are held behind `Arc` by the cache and hand out one decode
/// session per utterance. The session is exclusively owned by the utterance
/// worker for its whole lifetime.
pub trait RecognizerEngine: Send + Sync + 'static {
    type Session: DecodeSession;

    /// The engine's native decode sample rate in Hz. Frames pushed at a
    /// different rate are resampled before being fed.
    fn sample_rate(&self) -> u32;

    /// Open a fresh incremental decode session.
    fn create_session(&self) -> Result<Self::Session>;
}

/// One incremental decode in progress.
pub trait DecodeSession: Send + 'static {
    /// Feed decoded 16-bit samples to the incremental decoder.
    fn feed(&mut self, samples: &[i16]) -> Result<()>;

    /// The engine's current best-guess transcript for the audio so far.
    fn partial_decode(&mut self) -> Result<String>;

    /// Close the session and return up to `max_candidates` hypotheses,
    /// best first.
    fn finalize_with_candidates(self, max_candidates: usize) -> Result<Vec<Candidate>>;
}

/// One ranked transcript hypothesis: the sequence of tokens the decoder
/// recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    tokens: Vec<String>,
}

impl Candidate {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The candidate's text: tokens concatenated, surrounding whitespace
    /// trimmed.
    pub fn text(&self) -> String {
        self.tokens.concat().trim().to_string()
    }
}
