//! Haptic/sound feedback cues
//!
//! Each cue is described by a vibration pattern; a `FeedbackSink` turns it
//! into whatever the platform offers. Native builds log the cue.

/// Feedback cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Session opened
    Welcome,
    /// Block placed
    Click,
    /// Perfect placement
    Success,
    /// Game over
    Fail,
}

/// Alternating wait/vibrate durations in milliseconds
///
/// A single entry is one vibration of that length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibrationPattern(pub &'static [u32]);

impl VibrationPattern {
    /// Total pattern length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Welcome => "welcome",
            Cue::Click => "click",
            Cue::Success => "success",
            Cue::Fail => "fail",
        }
    }

    pub fn pattern(&self) -> VibrationPattern {
        match self {
            // short-long-short
            Cue::Welcome => VibrationPattern(&[0, 100, 200, 100]),
            Cue::Click => VibrationPattern(&[50]),
            Cue::Success => VibrationPattern(&[0, 100, 50, 100, 50, 100]),
            Cue::Fail => VibrationPattern(&[0, 300, 100, 300]),
        }
    }
}

/// Platform output for cues
pub trait FeedbackSink {
    fn emit(&mut self, cue: Cue, pattern: VibrationPattern);
}

/// Sink that only logs
#[derive(Debug, Default)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn emit(&mut self, cue: Cue, pattern: VibrationPattern) {
        log::info!("Feedback {} ({} ms)", cue.as_str(), pattern.duration_ms());
    }
}

/// Records cues; handy for tests and replays
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cues: Vec<Cue>,
}

impl FeedbackSink for RecordingSink {
    fn emit(&mut self, cue: Cue, _pattern: VibrationPattern) {
        self.cues.push(cue);
    }
}

/// Feedback manager gated by the user's setting
#[derive(Debug)]
pub struct Feedback<S: FeedbackSink> {
    sink: S,
    enabled: bool,
}

impl<S: FeedbackSink> Feedback<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a cue unless disabled
    pub fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        self.sink.emit(cue, cue.pattern());
    }
}
