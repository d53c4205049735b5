//! Approximate substring scoring in the style of the bitap matcher used by
//! Fuse.js with `ignoreLocation` set: the position of a match inside the text
//! does not matter, only how many edits the pattern needs to appear.

/// Patterns are matched in windows no wider than a bitap machine word.
pub const MAX_PATTERN_CHARS: usize = 32;

/// Best score a non-exact window match can report.
const MIN_MATCH_SCORE: f64 = 0.001;

#[derive(Clone, Debug)]
pub struct FuzzyPattern {
    folded: Vec<char>,
    windows: Vec<Vec<char>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchScore {
    pub is_match: bool,
    /// 0.0 is a perfect match, 1.0 no match at all.
    pub score: f64,
}

impl FuzzyPattern {
    /// Returns `None` for an empty pattern, which can never match.
    pub fn new(query: &str) -> Option<Self> {
        let folded: Vec<char> = fold_case(query).chars().collect();
        if folded.is_empty() {
            return None;
        }
        let windows = split_windows(&folded);
        Some(Self { folded, windows })
    }

    /// Scores the pattern against already case-folded text.
    pub fn score(&self, text: &[char], threshold: f64) -> MatchScore {
        if self.folded.as_slice() == text {
            return MatchScore {
                is_match: true,
                score: 0.0,
            };
        }

        let mut total = 0.0;
        let mut any_match = false;
        for window in &self.windows {
            let window_score = score_window(window, text, threshold);
            any_match |= window_score.is_match;
            total += window_score.score;
        }

        MatchScore {
            is_match: any_match,
            score: total / self.windows.len() as f64,
        }
    }
}

pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Length normalization: short fields weigh a match more than long ones.
/// Rounded to three decimals.
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    (1.0 / (tokens as f64).sqrt() * 1000.0).round() / 1000.0
}

/// Folds the field norm into a raw match score. Lower stays better.
pub fn weighted_score(raw: f64, norm: f64) -> f64 {
    let raw = if raw == 0.0 { f64::EPSILON } else { raw };
    raw.powf(norm)
}

fn split_windows(pattern: &[char]) -> Vec<Vec<char>> {
    if pattern.len() <= MAX_PATTERN_CHARS {
        return vec![pattern.to_vec()];
    }

    let remainder = pattern.len() % MAX_PATTERN_CHARS;
    let full_end = pattern.len() - remainder;
    let mut windows: Vec<Vec<char>> = pattern[..full_end]
        .chunks(MAX_PATTERN_CHARS)
        .map(<[char]>::to_vec)
        .collect();
    if remainder > 0 {
        // The tail window is the last full-width slice, overlapping its predecessor.
        windows.push(pattern[pattern.len() - MAX_PATTERN_CHARS..].to_vec());
    }
    windows
}

fn score_window(window: &[char], text: &[char], threshold: f64) -> MatchScore {
    let len = window.len();
    let max_errors = (threshold * len as f64).floor() as usize;

    match min_edit_distance(window, text, max_errors) {
        Some(errors) => MatchScore {
            is_match: true,
            score: (errors as f64 / len as f64).max(MIN_MATCH_SCORE),
        },
        None => MatchScore {
            is_match: false,
            score: 1.0,
        },
    }
}

/// Smallest Levenshtein distance between `pattern` and any substring of
/// `text`, or `None` when it exceeds `max_errors`.
fn min_edit_distance(pattern: &[char], text: &[char], max_errors: usize) -> Option<usize> {
    let m = pattern.len();
    // column[i]: edits to match pattern[..i] ending at the current text position.
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = column[m];

    for &t in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let above = column[i];
            let substitution = diagonal + usize::from(pattern[i - 1] != t);
            column[i] = substitution.min(above + 1).min(column[i - 1] + 1);
            diagonal = above;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    (best <= max_errors).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_substring_anywhere() {
        assert_eq!(min_edit_distance(&chars("mammal"), &chars("dogs are mammals too"), 0), Some(0));
    }

    #[test]
    fn tolerates_a_typo() {
        assert_eq!(min_edit_distance(&chars("mamals"), &chars("dogs are mammals"), 2), Some(1));
    }

    #[test]
    fn long_patterns_end_with_overlapping_window() {
        let pattern = chars(&"a".repeat(40));
        let windows = split_windows(&pattern);
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| w.len() == MAX_PATTERN_CHARS));
    }

    #[test]
    fn only_whole_field_equality_scores_zero() {
        let pattern = FuzzyPattern::new("Mammals").unwrap();
        assert_eq!(pattern.score(&chars("mammals"), 0.4).score, 0.0);

        let inside = pattern.score(&chars("dogs are mammals too"), 0.4);
        assert!(inside.is_match);
        assert_eq!(inside.score, MIN_MATCH_SCORE);
    }

    #[test]
    fn norm_rounds_to_three_places() {
        assert_eq!(field_norm("one two three"), 0.577);
        assert_eq!(field_norm("single"), 1.0);
    }
}
