use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),
    #[error("Clip load failed for {name}: {reason}")]
    LoadFailed { name: String, reason: String },
    #[error("No default animation in registry")]
    NoDefault,
    #[error("More than one default animation: {0}")]
    DuplicateDefault(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio fetch failed: {0}")]
    FetchFailed(String),
    #[error("Audio decode failed: {0}")]
    DecodeFailed(String),
    #[error("Audio device unavailable")]
    DeviceUnavailable,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat request failed: {0}")]
    RequestFailed(String),
    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),
}
