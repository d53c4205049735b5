use crate::chunk_text::Passage;
use crate::fuzzy_match::{field_norm, fold_case, weighted_score, FuzzyPattern};

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.4;

#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub page: u32,
    pub text: String,
    /// Lower is better.
    pub score: f64,
}

struct IndexedPassage {
    passage: Passage,
    folded: Vec<char>,
    norm: f64,
}

/// Read-only fuzzy index over one document's passages. Only passage text is
/// searched; page numbers ride along as metadata.
pub struct PassageIndex {
    entries: Vec<IndexedPassage>,
    threshold: f64,
}

impl PassageIndex {
    pub fn build(passages: Vec<Passage>, threshold: f64) -> Self {
        let entries = passages
            .into_iter()
            .map(|passage| IndexedPassage {
                folded: fold_case(&passage.text).chars().collect(),
                norm: field_norm(&passage.text),
                passage,
            })
            .collect::<Vec<_>>();
        tracing::debug!(passages = entries.len(), threshold, "built passage index");
        Self { entries, threshold }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best `top_k` passages for `query`, ascending by score. Ties keep
    /// passage order. An empty index or blank query yields nothing.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<Hit> {
        if top_k == 0 || self.entries.is_empty() {
            return vec![];
        }
        let Some(pattern) = FuzzyPattern::new(query.trim()) else {
            return vec![];
        };

        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let result = pattern.score(&entry.folded, self.threshold);
                result
                    .is_match
                    .then(|| (idx, weighted_score(result.score, entry.norm)))
            })
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(idx, score)| {
                let passage = &self.entries[idx].passage;
                Hit {
                    page: passage.page,
                    text: passage.text.clone(),
                    score,
                }
            })
            .collect()
    }
}
