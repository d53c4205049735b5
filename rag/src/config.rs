use std::env;
use std::time::Duration;

use crate::build_prompt::PromptSettings;
use crate::conversation::ConversationSettings;
use crate::retrieve_chunks::DEFAULT_MATCH_THRESHOLD;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer concisely using only the provided context. If the context doesn't contain the answer, say you couldn't find it.";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub chunk_chars: usize,
    pub top_k: usize,
    pub match_threshold: f64,
    pub request_timeout: Duration,
}

/// Connection settings handed to the generation client.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 400,
            chunk_chars: 900,
            top_k: 4,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env if present so the API key works without manual `source .env`.
        let _ = dotenvy::dotenv();
        let defaults = Self::default();
        Self {
            api_key: env::var("OPENROUTER_API_KEY")
                .or_else(|_| env::var("VITE_OPENROUTER_KEY"))
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            endpoint: env::var("PDFASK_ENDPOINT").unwrap_or(defaults.endpoint),
            model: env::var("PDFASK_MODEL").unwrap_or(defaults.model),
            system_prompt: env::var("PDFASK_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            max_tokens: parsed("PDFASK_MAX_TOKENS").unwrap_or(defaults.max_tokens),
            chunk_chars: parsed("PDFASK_CHUNK_CHARS").unwrap_or(defaults.chunk_chars),
            top_k: parsed("PDFASK_TOP_K").unwrap_or(defaults.top_k),
            match_threshold: parsed("PDFASK_MATCH_THRESHOLD").unwrap_or(defaults.match_threshold),
            request_timeout: parsed("PDFASK_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            request_timeout: self.request_timeout,
        }
    }

    pub fn conversation(&self) -> ConversationSettings {
        ConversationSettings {
            max_chars: self.chunk_chars,
            top_k: self.top_k,
            match_threshold: self.match_threshold,
            prompt: PromptSettings {
                model: self.model.clone(),
                system_prompt: self.system_prompt.clone(),
                max_tokens: self.max_tokens,
            },
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
