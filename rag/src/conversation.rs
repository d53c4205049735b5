//! Per-session question answering: retrieve, assemble, generate, cite.
//!
//! A [`Conversation`] owns the passage index for the loaded document and the
//! append-only transcript. Only one question is processed at a time; a
//! submission made while another is in flight is dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::build_prompt::{assemble, PromptSettings};
use crate::chunk_text::chunk_pages;
use crate::extract_pages::PageText;
use crate::generate::Generator;
use crate::retrieve_chunks::{Hit, PassageIndex};

pub const NO_MATCH_TEXT: &str = "No relevant content found.";
pub const FAILURE_TEXT: &str = "Error: could not contact AI service.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Citation {
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into(), citations: None }
    }

    pub fn assistant(text: impl Into<String>, citations: Option<Vec<Citation>>) -> Self {
        Self { role: Role::Assistant, text: text.into(), citations }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Retrieving,
    Assembling,
    Generating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    IndexNotReady,
    EmptyQuestion,
    Busy,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    NoMatch,
    Answered { citations: Vec<Citation> },
    Failed,
}

/// Capability to bring a page into view. Implemented by whatever renders the
/// document.
pub trait PageViewer: Send + Sync {
    fn scroll_to_page(&self, page: u32);
}

#[derive(Clone, Debug)]
pub struct ConversationSettings {
    pub max_chars: usize,
    pub top_k: usize,
    pub match_threshold: f64,
    pub prompt: PromptSettings,
}

pub struct Conversation {
    settings: ConversationSettings,
    generator: Arc<dyn Generator>,
    viewer: Arc<dyn PageViewer>,
    index: RwLock<Option<Arc<PassageIndex>>>,
    messages: Mutex<Vec<Message>>,
    phase: Mutex<Phase>,
    in_flight: AtomicBool,
}

impl Conversation {
    pub fn new(
        settings: ConversationSettings,
        generator: Arc<dyn Generator>,
        viewer: Arc<dyn PageViewer>,
    ) -> Self {
        Self {
            settings,
            generator,
            viewer,
            index: RwLock::new(None),
            messages: Mutex::new(Vec::new()),
            phase: Mutex::new(Phase::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Replaces the index with one built from `pages`. An in-flight question
    /// keeps searching the index it started with.
    pub fn load_document(&self, pages: &[PageText]) {
        let passages = chunk_pages(pages, self.settings.max_chars);
        let index = PassageIndex::build(passages, self.settings.match_threshold);
        tracing::info!(pages = pages.len(), passages = index.len(), "document loaded");
        *self.index.write() = Some(Arc::new(index));
    }

    pub fn is_ready(&self) -> bool {
        self.index.read().is_some()
    }

    pub fn passage_count(&self) -> usize {
        self.index.read().as_ref().map_or(0, |index| index.len())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn open_citation(&self, citation: &Citation) {
        self.viewer.scroll_to_page(citation.page);
    }

    pub async fn submit(&self, question: &str) -> SubmitOutcome {
        let question = question.trim();
        if question.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyQuestion);
        }
        let index = self.index.read().clone();
        let Some(index) = index else {
            return SubmitOutcome::Rejected(RejectReason::IndexNotReady);
        };
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("submission dropped, another question is in flight");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        }
        let _idle = IdleOnDrop(self);

        self.set_phase(Phase::Retrieving);
        let hits = index.search(question, self.settings.top_k);
        tracing::debug!(hits = hits.len(), "retrieved passages");
        if hits.is_empty() {
            self.append_exchange(question, Message::assistant(NO_MATCH_TEXT, Some(vec![])));
            return SubmitOutcome::NoMatch;
        }

        self.set_phase(Phase::Assembling);
        let request = assemble(&hits, question, &self.settings.prompt);
        let citations = cite_pages(&hits);

        self.set_phase(Phase::Generating);
        match self.generator.generate(&request).await {
            Ok(answer) => {
                self.append_exchange(
                    question,
                    Message::assistant(answer.trim(), Some(citations.clone())),
                );
                SubmitOutcome::Answered { citations }
            }
            Err(err) => {
                tracing::error!(error = %err, "answer generation failed");
                self.append_exchange(question, Message::assistant(FAILURE_TEXT, None));
                SubmitOutcome::Failed
            }
        }
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock() = phase;
    }

    fn append_exchange(&self, question: &str, reply: Message) {
        let mut messages = self.messages.lock();
        messages.push(Message::user(question));
        messages.push(reply);
    }
}

/// Distinct pages of `hits`, in order of first appearance.
pub fn cite_pages(hits: &[Hit]) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::new();
    for hit in hits {
        if !citations.iter().any(|c| c.page == hit.page) {
            citations.push(Citation { page: hit.page });
        }
    }
    citations
}

/// Returns the conversation to idle however `submit` exits, including when its
/// future is dropped mid-generation.
struct IdleOnDrop<'a>(&'a Conversation);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set_phase(Phase::Idle);
        self.0.in_flight.store(false, Ordering::Release);
    }
}
