//! Capture buffer for compiler output spans.

/// Accumulates raw log text while switched on.
///
/// Starting a capture that is already running continues it; starting from
/// the stopped state clears whatever the previous capture left behind.
/// Stopping keeps the buffer so the caller can still attach it to a record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    recording: bool,
    cache: String,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.recording {
            self.clear();
        }
        self.recording = true;
    }

    pub fn stop(&mut self) {
        self.recording = false;
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Append `text` if a capture is running, ignore it otherwise
    pub fn feed(&mut self, text: &str) {
        if self.recording {
            self.cache.push_str(text);
        }
    }

    /// Captured text so far
    pub fn record(&self) -> &str {
        &self.cache
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_ignored_while_stopped() {
        let mut rec = Recorder::new();
        rec.feed("ignored\n");
        assert_eq!(rec.record(), "");
        assert!(!rec.is_recording());
    }

    #[test]
    fn test_start_from_stopped_clears() {
        let mut rec = Recorder::new();
        rec.start();
        rec.feed("first\n");
        rec.stop();
        assert_eq!(rec.record(), "first\n");

        rec.start();
        assert_eq!(rec.record(), "");
        rec.feed("second\n");
        assert_eq!(rec.record(), "second\n");
    }

    #[test]
    fn test_start_while_recording_continues() {
        let mut rec = Recorder::new();
        rec.start();
        rec.feed("a\n");
        rec.start();
        rec.feed("b\n");
        assert_eq!(rec.record(), "a\nb\n");
    }

    #[test]
    fn test_stop_keeps_buffer_and_clear_empties_it() {
        let mut rec = Recorder::new();
        rec.start();
        rec.feed("kept\n");
        rec.stop();
        rec.feed("dropped\n");
        assert_eq!(rec.record(), "kept\n");

        rec.clear();
        assert_eq!(rec.record(), "");
    }

    #[test]
    fn test_clear_while_recording_keeps_recording() {
        let mut rec = Recorder::new();
        rec.start();
        rec.feed("x");
        rec.clear();
        rec.feed("y");
        assert!(rec.is_recording());
        assert_eq!(rec.record(), "y");
    }
}
