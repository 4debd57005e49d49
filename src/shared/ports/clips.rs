use std::time::Duration;

use crate::shared::error::AnimationError;

/// Metadata of a loaded animation clip. Actual clip data lives in the
/// presentation layer; the playback core only needs the length.
#[derive(Debug, Clone, Copy)]
pub struct Clip {
    pub duration: Duration,
}

/// Resolves an animation resource reference to its clip metadata.
/// Synchronous: clip manifests are local and loaded at startup.
pub trait ClipSource: Send + Sync {
    fn load(&self, resource: &str) -> Result<Clip, AnimationError>;
}
