mod build_prompt;
mod chunk_text;
mod config;
mod conversation;
mod error;
mod extract_pages;
mod fuzzy_match;
mod generate;
mod http;
mod retrieve_chunks;

pub use build_prompt::{
    assemble, format_context, PromptMessage, PromptRequest, PromptSettings, CONTEXT_SEPARATOR,
    TEMPERATURE,
};
pub use chunk_text::{chunk_pages, split_sentences, Passage};
pub use config::{Config, GenerationConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT};
pub use conversation::{
    cite_pages, Citation, Conversation, ConversationSettings, Message, PageViewer, Phase,
    RejectReason, Role, SubmitOutcome, FAILURE_TEXT, NO_MATCH_TEXT,
};
pub use error::{RagError, Result};
pub use extract_pages::{extract_pages, extract_pages_from_path, normalize_whitespace, pages_from_raw, PageText};
pub use generate::{extract_answer, ChatCompletionClient, Generator, ANSWER_POINTERS};
pub use retrieve_chunks::{Hit, PassageIndex, DEFAULT_MATCH_THRESHOLD};

