use std::io::Cursor;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use tokio::sync::oneshot;

use crate::shared::config;
use crate::shared::error::AudioError;
use crate::shared::ports::{AudioSink, PortFuture};

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Fetches voice audio over HTTP and plays it on the default output
/// device. Decoding and output run on a blocking task; the stop token is
/// polled so a scheduler `stop()` cuts playback promptly.
pub struct HttpAudioPlayer {
    client: Client,
}

impl HttpAudioPlayer {
    pub fn new() -> Result<Self, AudioError> {
        let client = Client::builder()
            .timeout(config::timeouts().audio_http)
            .build()
            .map_err(|e| AudioError::FetchFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

impl AudioSink for HttpAudioPlayer {
    fn play(
        &self,
        url: String,
        stop: oneshot::Receiver<()>,
    ) -> PortFuture<Result<(), AudioError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let resp = client
                .get(&url)
                .send()
                .await
                .map_err(|e| AudioError::FetchFailed(e.to_string()))?
                .error_for_status()
                .map_err(|e| AudioError::FetchFailed(e.to_string()))?;
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| AudioError::FetchFailed(e.to_string()))?;
            debug!("fetched {} audio bytes from {url}", bytes.len());

            let joined = tokio::task::spawn_blocking(move || -> Result<(), AudioError> {
                let mut stop = stop;
                let (_stream, handle) = rodio::OutputStream::try_default()
                    .map_err(|_| AudioError::DeviceUnavailable)?;
                let sink = rodio::Sink::try_new(&handle)
                    .map_err(|_| AudioError::DeviceUnavailable)?;
                let source = rodio::Decoder::new(Cursor::new(bytes.to_vec()))
                    .map_err(|e| AudioError::DecodeFailed(e.to_string()))?;
                sink.append(source);

                loop {
                    if sink.empty() {
                        break;
                    }
                    match stop.try_recv() {
                        Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                            sink.stop();
                            break;
                        }
                        Err(oneshot::error::TryRecvError::Empty) => {}
                    }
                    std::thread::sleep(STOP_POLL_INTERVAL);
                }
                Ok(())
            })
            .await;

            match joined {
                Ok(result) => result,
                Err(_) => Err(AudioError::DeviceUnavailable),
            }
        })
    }
}
