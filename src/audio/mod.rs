//! Audio frame handling for the streaming recognizer.
//!
//! Provides PCM frame decoding with the statistics the endpoint detector
//! needs, plus resampling between the host capture rate and the engine's
//! native rate via rubato.

mod frame;
pub mod resampler;

pub use frame::AudioFrame;
pub use resampler::FrameResampler;
