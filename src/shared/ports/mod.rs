use std::future::Future;
use std::pin::Pin;

pub mod audio;
pub mod chat;
pub mod clips;

pub use audio::AudioSink;
pub use chat::{ChatPort, ChatReply};
pub use clips::{Clip, ClipSource};

pub use crate::shared::error::{AnimationError, AudioError, ChatError};

pub type PortFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
