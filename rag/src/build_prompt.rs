use serde::Serialize;

use crate::retrieve_chunks::Hit;

pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";
/// Answers must be reproducible for the same context.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// Wire body of a chat-completion call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct PromptSettings {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
}

pub fn assemble(hits: &[Hit], question: &str, settings: &PromptSettings) -> PromptRequest {
    let context = format_context(hits);
    let user_content = format!("Context:\n{}\n\nQuestion: {}", context, question);

    PromptRequest {
        model: settings.model.clone(),
        messages: vec![
            PromptMessage { role: "system".to_string(), content: settings.system_prompt.clone() },
            PromptMessage { role: "user".to_string(), content: user_content },
        ],
        temperature: TEMPERATURE,
        max_tokens: settings.max_tokens,
    }
}

pub fn format_context(hits: &[Hit]) -> String {
    hits.iter()
        .map(|hit| format!("Page {}: {}", hit.page, hit.text))
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
