//! Scripted recognizer used by unit tests.
//!
//! Plays back a fixed sequence of partial decodes and returns a fixed
//! candidate list at finalization, so streaming behavior can be tested
//! without a real model.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};

use super::{Candidate, DecodeSession, RecognizerEngine};

pub(crate) struct ScriptedEngine {
    sample_rate: u32,
    partials: Vec<String>,
    candidates: Vec<Candidate>,
    fail_on_feed: bool,
    sessions_created: AtomicUsize,
}

impl ScriptedEngine {
    /// `partials` is returned one entry per decode call, repeating the last
    /// entry once exhausted. `candidates` is the finalization result, each
    /// entry a token sequence.
    pub(crate) fn new(partials: &[&str], candidates: &[&[&str]]) -> Self {
        Self {
            sample_rate: 16000,
            partials: partials.iter().map(|s| s.to_string()).collect(),
            candidates: candidates.iter().map(|tokens| Candidate::new(tokens.iter().map(|t| t.to_string()).collect())).collect(),
            fail_on_feed: false,
            sessions_created: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub(crate) fn failing_on_feed(mut self) -> Self {
        self.fail_on_feed = true;
        self
    }

    pub(crate) fn sessions_created(&self) -> usize {
        self.sessions_created.load(Ordering::SeqCst)
    }
}

impl RecognizerEngine for ScriptedEngine {
    type Session = ScriptedSession;

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn create_session(&self) -> Result<ScriptedSession> {
        self.sessions_created.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSession {
            partials: self.partials.clone(),
            next_partial: 0,
            candidates: self.candidates.clone(),
            fail_on_feed: self.fail_on_feed,
        })
    }
}

pub(crate) struct ScriptedSession {
    partials: Vec<String>,
    next_partial: usize,
    candidates: Vec<Candidate>,
    fail_on_feed: bool,
}

impl DecodeSession for ScriptedSession {
    fn feed(&mut self, _samples: &[i16]) -> Result<()> {
        if self.fail_on_feed {
            bail!("decoder rejected audio");
        }
        Ok(())
    }

    fn partial_decode(&mut self) -> Result<String> {
        if self.partials.is_empty() {
            return Ok(String::new());
        }
        let index = self.next_partial.min(self.partials.len() - 1);
        self.next_partial += 1;
        Ok(self.partials[index].clone())
    }

    fn finalize_with_candidates(self, max_candidates: usize) -> Result<Vec<Candidate>> {
        Ok(self.candidates.into_iter().take(max_candidates).collect())
    }
}
