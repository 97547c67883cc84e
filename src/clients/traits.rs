use async_trait::async_trait;
use thiserror::Error;

use crate::transcript::ConversationTurn;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode model response: {0}")]
    Decode(String),
    #[error("model response contained no text content")]
    EmptyResponse,
}

/// A chat-completion backend: system prompt plus ordered turns in, text out.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        max_tokens: u32,
    ) -> Result<String, ClientError>;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;
}
