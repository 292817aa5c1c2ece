//! Language-keyed cache of loaded recognizer engines.
//!
//! Models are expensive to load and safe to share, so one engine is kept
//! per language tag and reused across utterances. The map is read-mostly
//! and write-once-per-key.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::error::SttError;

use super::RecognizerEngine;

/// Loader invoked the first time a language is requested.
pub type EngineLoader<E> = Box<dyn Fn(&str) -> anyhow::Result<E> + Send + Sync>;

/// Lazily-populated map from language tag to loaded engine.
pub struct EngineCache<E> {
    engines: RwLock<HashMap<String, Arc<E>>>,
    loader: EngineLoader<E>,
}

impl<E: RecognizerEngine> EngineCache<E> {
    pub fn new(loader: impl Fn(&str) -> anyhow::Result<E> + Send + Sync + 'static) -> Self {
        Self { engines: RwLock::new(HashMap::new()), loader: Box::new(loader) }
    }

    /// Get the engine for `lang`, loading it on first use.
    ///
    /// Load failures are not cached; a later call retries the loader.
    ///
    /// # Errors
    /// Returns `SttError::Engine` when the loader fails.
    pub fn get(&self, lang: &str) -> Result<Arc<E>, SttError> {
        if let Some(engine) = self.engines.read().get(lang) {
            return Ok(engine.clone());
        }

        let mut engines = self.engines.write();
        // Another caller may have loaded it while we waited for the lock
        if let Some(engine) = engines.get(lang) {
            return Ok(engine.clone());
        }

        info!("loading recognizer model for language {}", lang);
        let engine = Arc::new((self.loader)(lang).map_err(SttError::Engine)?);
        engines.insert(lang.to_string(), engine.clone());
        Ok(engine)
    }

    /// Whether an engine for `lang` is already loaded.
    pub fn is_loaded(&self, lang: &str) -> bool {
        self.engines.read().contains_key(lang)
    }
}
