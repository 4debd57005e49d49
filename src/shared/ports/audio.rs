use tokio::sync::oneshot;

use crate::shared::error::AudioError;

use super::PortFuture;

/// Fetches and plays one audio resource.
///
/// The future resolves when playback finishes naturally or when `stop`
/// fires, whichever comes first. Implementations must not outlive the
/// stop signal: once it fires, audible output stops.
pub trait AudioSink: Send + Sync {
    fn play(&self, url: String, stop: oneshot::Receiver<()>) -> PortFuture<Result<(), AudioError>>;
}
