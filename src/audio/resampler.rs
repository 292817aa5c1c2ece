//! Streaming resampler bridging the host capture rate and the engine's
//! native decode rate.
//!
//! Uses rubato's FFT-based resampler. Frames arrive as 16-bit PCM from the
//! host; the resampler converts to f32 internally and hands back 16-bit
//! samples at the engine rate.

use anyhow::{Context, Result};
use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Chunk size for FFT-based resampling (provides good quality and performance).
const CHUNK_SIZE: usize = 1024;

/// Number of sub-chunks for FFT processing (higher = better quality but more CPU).
const SUB_CHUNKS: usize = 2;

/// Streaming frame resampler.
///
/// Accumulates incoming samples across frames until a full FFT chunk is
/// available, then emits resampled output. Mono only; the host contract
/// pushes mono PCM.
pub struct FrameResampler {
    resampler: Fft<f32>,
    input_buffer: Vec<f32>,
    output_buffer: Vec<f32>,
    output_frames_max: usize,
}

impl FrameResampler {
    /// Create a resampler converting `from_rate` Hz to `to_rate` Hz.
    pub fn new(from_rate: u32, to_rate: u32) -> Result<Self> {
        let resampler = Fft::<f32>::new(
            from_rate as usize,
            to_rate as usize,
            CHUNK_SIZE,
            SUB_CHUNKS,
            1, // mono
            FixedSync::Input,
        )
        .context("Failed to create resampler")?;

        let output_frames_max = resampler.output_frames_max();

        Ok(Self {
            resampler,
            input_buffer: Vec::with_capacity(CHUNK_SIZE * 2),
            output_buffer: vec![0.0f32; output_frames_max],
            output_frames_max,
        })
    }

    /// Feed host-rate samples, returning engine-rate samples once enough
    /// input has accumulated.
    ///
    /// Returns `None` while the internal buffer is still filling. Frames can
    /// be any size; output length varies with how many full chunks drained.
    pub fn process(&mut self, samples: &[i16]) -> Option<Vec<i16>> {
        self.input_buffer.extend(samples.iter().map(|&s| f32::from(s) / 32768.0));

        let mut resampled: Vec<i16> = Vec::new();
        while self.input_buffer.len() >= CHUNK_SIZE {
            let chunk: Vec<f32> = self.input_buffer.drain(..CHUNK_SIZE).collect();

            let input_adapter = InterleavedSlice::new(&chunk, 1, CHUNK_SIZE).ok()?;
            let mut output_adapter = InterleavedSlice::new_mut(&mut self.output_buffer, 1, self.output_frames_max).ok()?;

            let (_, frames_written) = self.resampler.process_into_buffer(&input_adapter, &mut output_adapter, None).ok()?;

            resampled.extend(self.output_buffer[..frames_written].iter().map(|&x| clamp_to_i16(x)));
        }

        if resampled.is_empty() { None } else { Some(resampled) }
    }
}

/// Convert a normalized f32 sample back to 16-bit, saturating at the rails.
fn clamp_to_i16(x: f32) -> i16 {
    (x * 32768.0).clamp(-32768.0, 32767.0) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample_stream() {
        // 1 second at 48kHz pushed in 1024-sample frames -> about 16000 samples out
        let mut resampler = FrameResampler::new(48000, 16000).unwrap();
        let frame = vec![0i16; 1024];
        let mut total = 0;
        for _ in 0..(48000 / 1024) {
            if let Some(out) = resampler.process(&frame) {
                total += out.len();
            }
        }
        // The FFT resampler holds some samples in flight at the tail
        assert!(total >= 14500 && total <= 16100, "got {} samples", total);
    }

    #[test]
    fn test_upsample_stream() {
        let mut resampler = FrameResampler::new(16000, 48000).unwrap();
        let frame = vec![0i16; 1024];
        let mut total = 0;
        for _ in 0..(16000 / 1024) {
            if let Some(out) = resampler.process(&frame) {
                total += out.len();
            }
        }
        assert!(total >= 42000 && total <= 48100, "got {} samples", total);
    }

    #[test]
    fn test_small_frames_buffer_until_chunk() {
        let mut resampler = FrameResampler::new(48000, 16000).unwrap();
        // 512 samples is half a chunk: no output yet
        assert!(resampler.process(&vec![0i16; 512]).is_none());
        // second half completes the chunk
        assert!(resampler.process(&vec![0i16; 512]).is_some());
    }

    #[test]
    fn test_clamp_to_i16_saturates() {
        assert_eq!(clamp_to_i16(2.0), 32767);
        assert_eq!(clamp_to_i16(-2.0), -32768);
        assert_eq!(clamp_to_i16(0.0), 0);
    }
}
