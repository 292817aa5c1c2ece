//! Frame-by-frame utterance endpoint detection.
//!
//! The detector keeps a rolling deadline: every frame that is both audible
//! (RMS above threshold) and carries new decoded content pushes the
//! deadline out. Once the clock passes the deadline the utterance is done.

use std::time::{Duration, Instant};

use crate::audio::AudioFrame;

/// RMS level a frame must exceed to count as audible speech.
const RMS_THRESHOLD: f64 = 10.0;

/// How long the utterance may run past the last qualifying frame.
const ENDPOINT_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-utterance endpoint state.
pub struct EndpointDetector {
    deadline: Instant,
    threshold: f64,
    timeout: Duration,
    previous_partial: String,
    voice_activity: bool,
}

impl EndpointDetector {
    pub fn new(start: Instant) -> Self {
        Self::with_limits(start, RMS_THRESHOLD, ENDPOINT_TIMEOUT)
    }

    pub(crate) fn with_limits(start: Instant, threshold: f64, timeout: Duration) -> Self {
        Self {
            deadline: start + timeout,
            threshold,
            timeout,
            previous_partial: String::new(),
            voice_activity: false,
        }
    }

    /// Observe one frame and its partial decode.
    ///
    /// Returns `true` when the utterance is finished: `now` has passed the
    /// rolling deadline. The deadline only ever moves forward; a frame below
    /// the RMS threshold never extends it, no matter what the partial says,
    /// and an unchanged partial never extends it, no matter how loud.
    pub fn observe(&mut self, frame: &AudioFrame, partial: &str, now: Instant) -> bool {
        if frame.has_signal() {
            self.voice_activity = true;
        }

        if frame.rms() > self.threshold && partial != self.previous_partial {
            self.deadline = now + self.timeout;
        }

        if partial != self.previous_partial {
            self.previous_partial = partial.to_owned();
        }

        now > self.deadline
    }

    /// Whether any frame in the utterance carried signal. Sticky once set.
    pub fn voice_activity(&self) -> bool {
        self.voice_activity
    }

    #[cfg(test)]
    fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alternating-amplitude frame with the requested RMS level.
    fn frame_with_rms(rms: f64) -> AudioFrame {
        let amplitude = (rms / 1000.0 * 32768.0).round() as i16;
        AudioFrame::from_samples((0..1600).map(|i| if i % 2 == 0 { amplitude } else { -amplitude }).collect())
    }

    fn silent_frame() -> AudioFrame {
        AudioFrame::from_samples(vec![0; 1600])
    }

    #[test]
    fn test_loud_frame_with_new_partial_extends_deadline() {
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);
        let initial = detector.deadline();

        let now = start + Duration::from_secs(2);
        assert!(!detector.observe(&frame_with_rms(50.0), "hello", now));
        assert_eq!(detector.deadline(), now + Duration::from_secs(5));
        assert!(detector.deadline() > initial);
    }

    #[test]
    fn test_quiet_frame_never_extends_even_with_new_partial() {
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);
        let initial = detector.deadline();

        detector.observe(&frame_with_rms(2.0), "hello", start + Duration::from_secs(1));
        detector.observe(&frame_with_rms(2.0), "hello there", start + Duration::from_secs(2));
        assert_eq!(detector.deadline(), initial);
    }

    #[test]
    fn test_loud_frame_with_unchanged_partial_does_not_extend() {
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);

        let first = start + Duration::from_secs(1);
        detector.observe(&frame_with_rms(50.0), "hello", first);
        let after_first = detector.deadline();

        // Same partial again, still loud: deadline stays where it was
        detector.observe(&frame_with_rms(50.0), "hello", start + Duration::from_secs(2));
        assert_eq!(detector.deadline(), after_first);
    }

    #[test]
    fn test_finished_when_clock_passes_deadline() {
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);

        assert!(!detector.observe(&silent_frame(), "", start + Duration::from_secs(4)));
        assert!(detector.observe(&silent_frame(), "", start + Duration::from_secs(6)));
    }

    #[test]
    fn test_voice_activity_is_sticky() {
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);

        detector.observe(&silent_frame(), "", start);
        assert!(!detector.voice_activity());

        detector.observe(&frame_with_rms(50.0), "hi", start + Duration::from_millis(100));
        assert!(detector.voice_activity());

        detector.observe(&silent_frame(), "hi", start + Duration::from_millis(200));
        assert!(detector.voice_activity());
    }

    #[test]
    fn test_endpoint_follows_last_qualifying_frame() {
        // 3 seconds of loud frames with changing partials, then quiet frames:
        // the utterance must end about 5s after the last loud frame, not 5s
        // after the quiet tail stops changing.
        let start = Instant::now();
        let mut detector = EndpointDetector::new(start);
        let step = Duration::from_millis(100);

        let mut finished_at = None;
        for tick in 0..120 {
            let now = start + step * tick;
            let seconds = tick as f64 * 0.1;
            let (frame, partial) = if seconds < 3.0 {
                (frame_with_rms(50.0), format!("word{}", tick))
            } else {
                (frame_with_rms(2.0), format!("tail{}", tick))
            };
            if detector.observe(&frame, &partial, now) {
                finished_at = Some(seconds);
                break;
            }
        }

        let finished_at = finished_at.expect("utterance never finished");
        // Last qualifying frame at 2.9s; deadline 7.9s; first strictly-later
        // frame observed at 8.0s
        assert!((finished_at - 8.0).abs() < 0.15, "finished at {}s", finished_at);
    }
}
