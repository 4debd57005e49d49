use serde::Deserialize;

/// One timed unit of speech and gesture from the chat server.
///
/// Timestamps are absolute milliseconds on the session's playback clock;
/// the server guarantees `end_timestamp >= start_timestamp` but the
/// scheduler clamps anyway.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub sentence: String,
    #[serde(default)]
    pub sentiment: String,
    pub audio_file: Option<String>,
    pub animation: Option<String>,
    pub start_timestamp: f64,
    pub end_timestamp: f64,
}

impl Segment {
    /// Hold duration in milliseconds, clamped to zero for malformed segments.
    pub fn hold_ms(&self) -> f64 {
        (self.end_timestamp - self.start_timestamp).max(0.0)
    }
}
