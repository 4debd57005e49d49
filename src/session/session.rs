use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::playback::SchedulerHandle;
use crate::shared::entities::ChatMessage;
use crate::shared::error::ChatError;
use crate::shared::ports::ChatPort;

/// Animation held while a chat request is in flight.
const THINKING_GESTURE: &str = "think";
/// Gesture to settle on once the reply has landed.
const IDLE_GESTURE: &str = "idle";

/// One user-facing conversation: transcript history plus the scheduler
/// that animates the replies. The session is the only writer of its
/// queue; playback order is reply order.
pub struct ChatSession {
    id: Uuid,
    personality: String,
    history: Vec<ChatMessage>,
    chat: Arc<dyn ChatPort>,
    scheduler: SchedulerHandle,
}

impl ChatSession {
    pub fn new(
        personality: impl Into<String>,
        chat: Arc<dyn ChatPort>,
        scheduler: SchedulerHandle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            personality: personality.into(),
            history: Vec::new(),
            chat,
            scheduler,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends one user turn. The avatar thinks while the request is in
    /// flight and the reply's segments are queued for playback. On
    /// failure the error surfaces to the caller and nothing is enqueued.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String, ChatError> {
        let text = text.into();
        // The wire history is the transcript before this turn; the
        // prompt itself travels in its own field.
        let prior = self.history.clone();
        self.history.push(ChatMessage::user(text.clone()));
        self.scheduler.play_gesture(THINKING_GESTURE);

        let result = self
            .chat
            .send(text, prior, self.personality.clone())
            .await;
        // Response fetched (or not): stop thinking either way.
        self.scheduler.play_gesture(IDLE_GESTURE);

        match result {
            Ok(reply) => {
                info!(
                    "[session {}] reply with {} segment(s)",
                    self.id,
                    reply.segments.len()
                );
                self.history.push(ChatMessage::assistant(reply.answer.clone()));
                self.scheduler.enqueue(reply.segments);
                Ok(reply.answer)
            }
            Err(e) => {
                warn!("[session {}] chat request failed: {e}", self.id);
                Err(e)
            }
        }
    }

    /// Drops queued segments and returns the avatar to idle.
    pub fn reset(&self) {
        self.scheduler.reset();
    }
}
