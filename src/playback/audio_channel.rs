use std::sync::Arc;

use log::warn;
use tokio::sync::oneshot;

use crate::shared::ports::AudioSink;

/// Owns at most one playing audio handle. The scheduler stops the channel
/// before starting the next segment, so two handles never overlap.
pub struct AudioChannel {
    sink: Arc<dyn AudioSink>,
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
}

impl AudioChannel {
    pub fn new(sink: Arc<dyn AudioSink>, base_url: impl Into<String>) -> Self {
        Self {
            sink,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stop: None,
        }
    }

    /// Begins playback of `<base-url>/<audio_file>`, fire-and-forget.
    /// Fetch or decode failures are logged by the spawned task; the
    /// segment's animation proceeds regardless.
    pub fn start(&mut self, audio_file: &str) {
        if self.stop.is_some() {
            warn!("audio start while a handle is live, stopping the previous one");
            self.stop();
        }
        let (stop_tx, stop_rx) = oneshot::channel();
        self.stop = Some(stop_tx);

        let url = format!("{}/{}", self.base_url, audio_file);
        let fut = self.sink.play(url.clone(), stop_rx);
        tokio::spawn(async move {
            if let Err(e) = fut.await {
                warn!("audio playback failed for {url}: {e}");
            }
        });
    }

    /// Stops and releases the current handle, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    pub fn has_handle(&self) -> bool {
        self.stop.is_some()
    }
}
