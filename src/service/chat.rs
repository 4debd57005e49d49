use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::shared::config;
use crate::shared::entities::{ChatMessage, Segment};
use crate::shared::error::ChatError;
use crate::shared::ports::{ChatPort, ChatReply, PortFuture};

#[derive(Serialize)]
struct ChatRequest {
    prompt: String,
    history: Vec<ChatMessage>,
    personality: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    answer: String,
    response: Vec<Segment>,
}

/// Client for the remote chat endpoint: POST `<base>/chat` with the
/// prompt, transcript history and personality; the reply carries the
/// answer text and the timed segments.
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
}

impl HttpChatClient {
    pub fn new(base_url: &str) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config::timeouts().chat_http)
            .build()
            .map_err(|e| ChatError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
        })
    }
}

impl ChatPort for HttpChatClient {
    fn send(
        &self,
        prompt: String,
        history: Vec<ChatMessage>,
        personality: String,
    ) -> PortFuture<Result<ChatReply, ChatError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let resp = client
                .post(&endpoint)
                .json(&ChatRequest {
                    prompt,
                    history,
                    personality,
                })
                .send()
                .await
                .map_err(|e| ChatError::RequestFailed(e.to_string()))?
                .error_for_status()
                .map_err(|e| ChatError::RequestFailed(e.to_string()))?;

            let body: ChatResponse = resp
                .json()
                .await
                .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

            Ok(ChatReply {
                answer: body.answer,
                segments: body.response,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = HttpChatClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.endpoint, "http://127.0.0.1:8000/chat");
    }

    #[test]
    fn response_parses_wire_shape() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "answer": "Sure!",
                "response": [
                    {
                        "sentence": "Sure!",
                        "sentiment": "happy",
                        "audio_file": "audio_0.wav",
                        "animation": "cheer",
                        "start_timestamp": 120.0,
                        "end_timestamp": 1320.0
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.answer, "Sure!");
        assert_eq!(body.response.len(), 1);
        assert_eq!(body.response[0].animation.as_deref(), Some("cheer"));
    }
}
