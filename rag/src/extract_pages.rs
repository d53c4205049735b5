use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{RagError, Result};

/// Text of one PDF page, numbered from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageText>> {
    // pdf-extract panics on some malformed font tables instead of returning an error.
    let raw = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| RagError::Pdf("extractor panicked on malformed input".to_string()))?
    .map_err(|e| RagError::Pdf(e.to_string()))?;

    let pages = pages_from_raw(raw);
    tracing::debug!(pages = pages.len(), "extracted PDF text");
    Ok(pages)
}

pub fn extract_pages_from_path(path: impl AsRef<Path>) -> Result<Vec<PageText>> {
    let bytes = std::fs::read(path.as_ref())?;
    extract_pages(&bytes)
}

/// Numbers raw page strings from 1 and collapses their whitespace. Blank pages
/// are kept so numbering stays aligned with the rendered document.
pub fn pages_from_raw<I, S>(raw: I) -> Vec<PageText>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .zip(1u32..)
        .map(|(text, page)| PageText {
            page,
            text: normalize_whitespace(text.as_ref()),
        })
        .collect()
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
