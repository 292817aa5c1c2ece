//! The streaming speech-to-text contract and its generic implementation.

use tracing::{debug, info, warn};

use crate::config::PluginConfig;
use crate::engine::{EngineCache, RecognizerEngine};
use crate::error::SttError;
use crate::stream::{Transcription, UtteranceStream};

/// Streaming speech-to-text contract exposed to the host framework.
///
/// One stable interface: start a stream, push chunks, stop and collect the
/// result. A host drives exactly one utterance at a time per plugin.
#[allow(async_fn_in_trait)]
pub trait StreamingStt {
    /// Begin capturing one utterance. Any still-active stream is discarded.
    async fn stream_start(&mut self, lang: Option<&str>) -> Result<(), SttError>;

    /// Push one chunk of 16-bit little-endian PCM audio.
    async fn stream_data(&mut self, chunk: &[u8]) -> Result<(), SttError>;

    /// Stop the stream and return the ranked transcription, or `None` when
    /// the utterance produced no usable result.
    async fn stream_stop(&mut self) -> Result<Option<Transcription>, SttError>;
}

/// Streaming STT plugin generic over the recognizer engine.
///
/// Engines are loaded once per language and shared across utterances; the
/// loader receives the language tag and typically builds the engine from
/// the configured model and scorer paths.
pub struct SttPlugin<E: RecognizerEngine> {
    config: PluginConfig,
    engines: EngineCache<E>,
    active: Option<UtteranceStream>,
}

impl<E: RecognizerEngine> SttPlugin<E> {
    /// Create the plugin.
    ///
    /// # Errors
    /// Configuration problems (missing model file, zero sample rate) are
    /// fatal here, before any stream is started.
    pub fn new(config: PluginConfig, loader: impl Fn(&str) -> anyhow::Result<E> + Send + Sync + 'static) -> Result<Self, SttError> {
        config.validate()?;
        Ok(Self { config, engines: EngineCache::new(loader), active: None })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}

impl<E: RecognizerEngine> StreamingStt for SttPlugin<E> {
    async fn stream_start(&mut self, lang: Option<&str>) -> Result<(), SttError> {
        if let Some(previous) = self.active.take() {
            warn!("stream_start while a stream is active, discarding the old utterance");
            drop(previous);
        }

        let lang = lang.unwrap_or(&self.config.lang);
        let engine = self.engines.get(lang)?;
        let stream = UtteranceStream::spawn(engine.as_ref(), self.config.sample_rate)?;

        debug!("utterance stream started for language {}", lang);
        self.active = Some(stream);
        Ok(())
    }

    async fn stream_data(&mut self, chunk: &[u8]) -> Result<(), SttError> {
        let stream = self.active.as_ref().ok_or(SttError::NoActiveStream)?;
        stream.push(chunk.to_vec()).await
    }

    async fn stream_stop(&mut self) -> Result<Option<Transcription>, SttError> {
        let stream = self.active.take().ok_or(SttError::NoActiveStream)?;
        let result = stream.finish().await?;

        match &result {
            Some(transcription) => info!("transcribed: {}", transcription.primary()),
            None => info!("utterance produced no result"),
        }

        Ok(result)
    }
}
