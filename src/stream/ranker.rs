//! Post-processing of the recognizer's ranked candidates into a final
//! transcription.

use tracing::{debug, warn};

use crate::engine::Candidate;

/// Top candidates matching one of these are demoted to the end of the list.
/// The model produces them for short noise bursts far more often than for
/// real speech.
const KNOWN_BAD_CANDIDATES: &[&str] = &["he"];

/// Ranked transcripts for one utterance. The primary answer is always the
/// first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    transcripts: Vec<String>,
}

impl Transcription {
    /// The best transcript.
    pub fn primary(&self) -> &str {
        &self.transcripts[0]
    }

    /// All transcripts, best first.
    pub fn transcripts(&self) -> &[String] {
        &self.transcripts
    }

    pub fn into_transcripts(self) -> Vec<String> {
        self.transcripts
    }
}

/// Select the final transcription from the engine's candidate list.
///
/// Returns `None` ("no result") when:
/// - the engine produced no candidates at all,
/// - the top candidate decodes to the empty string, or
/// - no frame in the utterance carried signal (some models return
///   transcripts for pure silence; those are suppressed here).
///
/// A top candidate in the known-bad set is rotated to the end of the list
/// rather than dropped, so the next hypothesis becomes the primary answer.
pub fn rank_candidates(candidates: Vec<Candidate>, voice_activity: bool) -> Option<Transcription> {
    let mut transcripts: Vec<String> = candidates.iter().map(Candidate::text).collect();
    debug!("candidate transcripts: {:?}", transcripts);

    if transcripts.is_empty() {
        debug!("decoder returned no candidates");
        return None;
    }

    if transcripts[0].is_empty() {
        debug!("top candidate is empty, reporting no result");
        return None;
    }

    if !voice_activity {
        warn!("audio stream carried no signal, discarding {} candidate(s)", transcripts.len());
        return None;
    }

    if KNOWN_BAD_CANDIDATES.contains(&transcripts[0].as_str()) {
        let demoted = transcripts.remove(0);
        debug!("demoting low-confidence top candidate {:?}", demoted);
        transcripts.push(demoted);
    }

    Some(Transcription { transcripts })
}
