use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::build_prompt::PromptRequest;
use crate::config::GenerationConfig;
use crate::error::{RagError, Result};
use crate::http::{build_client, post_json};

/// Where the answer text may live in a completion response, tried in order.
/// The upstream schema varies between providers and versions.
pub const ANSWER_POINTERS: [&str; 3] = ["/choices/0/message/content", "/result", "/output/0/content"];

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &PromptRequest) -> Result<String>;
}

/// Client for an OpenAI-style chat-completions endpoint (OpenRouter by default).
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(cfg: &GenerationConfig) -> Result<Self> {
        Ok(Self {
            http: build_client(cfg.request_timeout)?,
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[async_trait]
impl Generator for ChatCompletionClient {
    async fn generate(&self, request: &PromptRequest) -> Result<String> {
        let key = self.credential().ok_or_else(|| {
            RagError::Config("missing generation API key (set OPENROUTER_API_KEY)".to_string())
        })?;
        let body = post_json::<Value, _>(&self.http, &self.endpoint, key, request).await?;
        Ok(extract_answer(&body))
    }
}

/// Pulls the answer out of whichever known shape the response has, falling
/// back to the serialized response itself.
pub fn extract_answer(body: &Value) -> String {
    for pointer in ANSWER_POINTERS {
        if let Some(text) = body.pointer(pointer).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    tracing::debug!("no known answer field in response, returning raw body");
    body.to_string()
}
