use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::shared::error::AnimationError;
use crate::shared::ports::{Clip, ClipSource};

const MANIFEST_FILE_NAME: &str = "clips.local.json";
const FALLBACK_CLIP_SECONDS: f64 = 2.4;

#[derive(Deserialize)]
struct ManifestEntry {
    resource: String,
    duration_ms: u64,
}

/// Clip lengths from an optional local manifest, with a fixed fallback
/// for resources the manifest does not mention. The renderer owns the
/// actual clip data; the playback core only needs durations for the
/// finished notification of one-shot clips.
pub struct ManifestClipSource {
    durations: HashMap<String, Duration>,
    fallback: Duration,
}

impl ManifestClipSource {
    pub fn load_default() -> Self {
        Self::from_file(Path::new(MANIFEST_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Self {
        let durations = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<Vec<ManifestEntry>>(&text) {
                Ok(entries) => entries
                    .into_iter()
                    .map(|e| (e.resource, Duration::from_millis(e.duration_ms)))
                    .collect(),
                Err(e) => {
                    warn!("clip manifest {} is malformed: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            durations,
            fallback: Duration::from_secs_f64(FALLBACK_CLIP_SECONDS),
        }
    }
}

impl ClipSource for ManifestClipSource {
    fn load(&self, resource: &str) -> Result<Clip, AnimationError> {
        let duration = self
            .durations
            .get(resource)
            .copied()
            .unwrap_or(self.fallback);
        Ok(Clip { duration })
    }
}
