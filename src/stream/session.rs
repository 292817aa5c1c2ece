//! One utterance capture session.
//!
//! The producer (host) pushes raw PCM chunks into a bounded channel; a
//! dedicated consumer task owns the decode session and processes frames one
//! at a time. The consumer exits when the endpoint deadline passes, when it
//! receives the empty sentinel chunk, or when the producer goes away, and
//! reports its result through a oneshot exactly once.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::audio::{AudioFrame, FrameResampler};
use crate::engine::{DecodeSession, MAX_CANDIDATES, RecognizerEngine};
use crate::error::SttError;

use super::endpoint::EndpointDetector;
use super::ranker::{Transcription, rank_candidates};

/// Frames buffered between producer and consumer before pushes await.
const FRAME_QUEUE_DEPTH: usize = 32;

type UtteranceResult = Result<Option<Transcription>, SttError>;

/// Handle to an in-flight utterance.
///
/// Dropping the handle closes the channel; the worker then finalizes and
/// its result is discarded.
pub struct UtteranceStream {
    frames: mpsc::Sender<Vec<u8>>,
    result: oneshot::Receiver<UtteranceResult>,
}

impl UtteranceStream {
    /// Open a decode session on `engine` and spawn the consumer task.
    ///
    /// `host_sample_rate` is the rate of the chunks the producer will push;
    /// when it differs from the engine's native rate a resampler is placed
    /// in front of the decoder.
    ///
    /// # Errors
    /// Fails when the engine cannot open a session or the rate pair is not
    /// resamplable.
    pub fn spawn<E: RecognizerEngine>(engine: &E, host_sample_rate: u32) -> Result<Self, SttError> {
        Self::spawn_with_detector(engine, host_sample_rate, EndpointDetector::new(Instant::now()))
    }

    pub(crate) fn spawn_with_detector<E: RecognizerEngine>(
        engine: &E,
        host_sample_rate: u32,
        detector: EndpointDetector,
    ) -> Result<Self, SttError> {
        let session = engine.create_session().map_err(SttError::Engine)?;

        let resampler = if host_sample_rate != engine.sample_rate() {
            debug!("resampling host audio {} Hz -> engine {} Hz", host_sample_rate, engine.sample_rate());
            Some(FrameResampler::new(host_sample_rate, engine.sample_rate()).map_err(|e| SttError::Config(e.to_string()))?)
        } else {
            None
        };

        let (frame_tx, frame_rx) = mpsc::channel(FRAME_QUEUE_DEPTH);
        let (result_tx, result_rx) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = consume_frames(session, resampler, detector, frame_rx).await;
            // The single completion signal for this utterance, on every exit
            // path: deadline, sentinel, closed channel, or engine error.
            let _ = result_tx.send(outcome);
        });

        Ok(Self { frames: frame_tx, result: result_rx })
    }

    /// Push one PCM chunk. An empty chunk asks the worker to stop.
    ///
    /// Chunks pushed after the endpoint already closed the utterance are
    /// dropped silently; the result is picked up via [`finish`].
    ///
    /// [`finish`]: UtteranceStream::finish
    pub async fn push(&self, chunk: Vec<u8>) -> Result<(), SttError> {
        if self.frames.send(chunk).await.is_err() {
            debug!("frame dropped, utterance already finalized");
        }
        Ok(())
    }

    /// Request termination and wait for the utterance result.
    ///
    /// `Ok(None)` is the "no result" outcome (silence, empty decode).
    /// Engine errors raised during the stream surface here.
    pub async fn finish(self) -> Result<Option<Transcription>, SttError> {
        // Sentinel; the worker may already be gone, which is fine
        let _ = self.frames.send(Vec::new()).await;
        drop(self.frames);
        self.result.await.map_err(|_| SttError::StreamClosed)?
    }
}

/// The consumer loop: feed, decode, endpoint-check, finalize.
async fn consume_frames<S: DecodeSession>(
    mut session: S,
    mut resampler: Option<FrameResampler>,
    mut detector: EndpointDetector,
    mut frames: mpsc::Receiver<Vec<u8>>,
) -> UtteranceResult {
    loop {
        let Some(chunk) = frames.recv().await else {
            debug!("producer went away, closing utterance");
            break;
        };
        if chunk.is_empty() {
            debug!("stop sentinel received, closing utterance");
            break;
        }

        let frame = AudioFrame::from_le_bytes(&chunk)?;
        let now = Instant::now();

        // Endpoint statistics are taken on the frame as pushed by the host;
        // the decoder gets the engine-rate samples.
        match resampler.as_mut() {
            Some(resampler) => {
                if let Some(native) = resampler.process(frame.samples()) {
                    session.feed(&native).map_err(SttError::Engine)?;
                }
            }
            None => session.feed(frame.samples()).map_err(SttError::Engine)?,
        }

        let partial = session.partial_decode().map_err(SttError::Engine)?;

        if detector.observe(&frame, &partial, now) {
            debug!("endpoint deadline passed, closing utterance");
            break;
        }
    }

    let candidates = session.finalize_with_candidates(MAX_CANDIDATES).map_err(SttError::Engine)?;
    debug!("decoder produced {} candidate(s)", candidates.len());

    Ok(rank_candidates(candidates, detector.voice_activity()))
}
