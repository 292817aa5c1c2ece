//! PCM audio frames and the per-frame statistics used for endpointing.

use crate::error::SttError;

/// Normalization factor for 16-bit signed samples.
const SHORT_NORMALIZE: f64 = 1.0 / 32768.0;

/// One slice of the continuous 16-bit signed little-endian PCM stream
/// pushed by the host.
///
/// Frames are ephemeral: decoded from the raw chunk, fed to the recognizer,
/// measured for the endpoint detector, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    samples: Vec<i16>,
}

impl AudioFrame {
    /// Decode a frame from raw little-endian bytes.
    ///
    /// # Errors
    /// Returns `SttError::UnalignedChunk` when the chunk does not contain a
    /// whole number of 16-bit samples.
    pub fn from_le_bytes(chunk: &[u8]) -> Result<Self, SttError> {
        if chunk.len() % 2 != 0 {
            return Err(SttError::UnalignedChunk(chunk.len()));
        }
        let samples = chunk.chunks_exact(2).map(|pair| i16::from_le_bytes([pair[0], pair[1]])).collect();
        Ok(Self { samples })
    }

    /// Build a frame from already-decoded samples.
    pub fn from_samples(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// The decoded samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples in the frame.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the frame contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Root-mean-square energy of the frame, normalized to the 16-bit sample
    /// range and scaled by 1000.
    ///
    /// Uses the population mean over the frame. This is a loudness proxy for
    /// voice activity, not a calibrated level meter.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_squares: f64 = self
            .samples
            .iter()
            .map(|&sample| {
                let normalized = f64::from(sample) * SHORT_NORMALIZE;
                normalized * normalized
            })
            .sum();
        (sum_squares / self.samples.len() as f64).sqrt() * 1000.0
    }

    /// Whether the frame carries any signal at all (`max != min`).
    ///
    /// A frame of identical samples is digital silence; some models return
    /// transcripts for it anyway, so the stream tracks this separately from
    /// RMS energy.
    pub fn has_signal(&self) -> bool {
        match (self.samples.iter().max(), self.samples.iter().min()) {
            (Some(max), Some(min)) => max != min,
            _ => false,
        }
    }
}
