//! Anthropic Messages API client used for interview turns and report generation

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clients::traits::{ClientError, ModelClient};
use crate::config::ModelConfig;
use crate::transcript::ConversationTurn;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ERROR_SNIPPET_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(config: &ModelConfig, api_key: Option<String>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        // No timeout unless configured; the upstream call waits on reqwest's defaults.
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
        })
    }

    fn build_request<'a>(
        &'a self,
        system: &'a str,
        turns: &'a [ConversationTurn],
        max_tokens: u32,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: turns
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        max_tokens: u32,
    ) -> Result<String, ClientError> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;
        let body = self.build_request(system, turns, max_tokens);

        tracing::debug!(
            "Sending {} turn(s) to {} (max_tokens={})",
            turns.len(),
            self.model,
            max_tokens
        );

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: truncate_chars(error_text.trim(), ERROR_SNIPPET_CHARS),
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        first_text(parsed).ok_or(ClientError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
}

fn truncate_chars(input: &str, max: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in input.chars().enumerate() {
        if idx >= max {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}
