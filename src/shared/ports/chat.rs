use crate::shared::entities::{ChatMessage, Segment};
use crate::shared::error::ChatError;

use super::PortFuture;

/// A reply from the chat server: the display answer plus the timed
/// speech segments that drive playback.
#[derive(Debug)]
pub struct ChatReply {
    pub answer: String,
    pub segments: Vec<Segment>,
}

pub trait ChatPort: Send + Sync {
    fn send(
        &self,
        prompt: String,
        history: Vec<ChatMessage>,
        personality: String,
    ) -> PortFuture<Result<ChatReply, ChatError>>;
}
