use crate::extract_pages::PageText;

/// A bounded slice of one page's text; the unit of retrieval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Passage {
    pub page: u32,
    pub text: String,
}

/// Splits every page into sentence-aligned passages of at most `max_chars`
/// characters. A single sentence longer than `max_chars` becomes one oversized
/// passage rather than being cut.
pub fn chunk_pages(pages: &[PageText], max_chars: usize) -> Vec<Passage> {
    let mut passages = Vec::new();

    for page in pages {
        let pieces = chunk_page(&page.text, max_chars);
        if pieces.is_empty() {
            if !page.text.trim().is_empty() {
                passages.push(Passage {
                    page: page.page,
                    text: page.text.chars().take(max_chars).collect(),
                });
            }
            continue;
        }
        passages.extend(pieces.into_iter().map(|text| Passage {
            page: page.page,
            text,
        }));
    }

    passages
}

fn chunk_page(text: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();
        if buffer_chars > 0 && buffer_chars + 1 + sentence_chars > max_chars {
            out.push(std::mem::take(&mut buffer));
            buffer_chars = 0;
        }
        if buffer_chars > 0 {
            buffer.push(' ');
            buffer_chars += 1;
        }
        buffer.push_str(sentence);
        buffer_chars += sentence_chars;
    }

    if buffer_chars > 0 {
        out.push(buffer);
    }
    out
}

/// Breaks text after `.`, `?` or `!` when followed by whitespace. Returned
/// sentences are trimmed and never empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '?' | '!')) {
            push_trimmed(&mut sentences, &text[start..idx]);
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
        }
        prev = Some(ch);
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}
