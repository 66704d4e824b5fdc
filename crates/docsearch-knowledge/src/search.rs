//! Keyword-overlap scoring and ranking.
//!
//! The score of a text against a query is the fraction of query words that
//! "match" some word of the text, where two words match when either one is a
//! substring of the other. Each query word counts at most once.

use std::sync::OnceLock;

use docsearch_core::types::{Document, SearchResult};
use regex::Regex;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Lowercase `text` and split it on runs of whitespace.
///
/// Leading or trailing whitespace produces an empty word at that end, and an
/// empty input produces a single empty word. An empty word is a substring of
/// every word, so it always matches.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    whitespace_re().split(&lowered).map(str::to_owned).collect()
}

fn words_match(query_word: &str, text_word: &str) -> bool {
    text_word.contains(query_word) || query_word.contains(text_word)
}

/// Similarity of `text` to `query`, in `[0, 1]`.
pub fn similarity(query: &str, text: &str) -> f64 {
    let query_words = tokenize(query);
    if query_words.is_empty() {
        return 0.0;
    }
    let text_words = tokenize(text);

    let matched = query_words
        .iter()
        .filter(|q| text_words.iter().any(|t| words_match(q, t)))
        .count();

    matched as f64 / query_words.len() as f64
}

/// The text a document is scored on: content, a space, then title.
fn searchable_text(doc: &Document) -> String {
    format!("{} {}", doc.content, doc.metadata.title)
}

/// Turn a caller-supplied limit into a result count.
///
/// Absent means `default`; zero, negative or NaN means no results; fractions
/// are truncated.
pub fn resolve_limit(limit: Option<f64>, default: usize) -> usize {
    match limit {
        None => default,
        Some(l) if l.is_nan() || l <= 0.0 => 0,
        Some(l) => l.trunc() as usize,
    }
}

/// Rank `documents` against `query`.
///
/// Documents scoring zero are dropped. The rest are sorted by descending
/// similarity; ties keep their order in `documents`. At most `limit`
/// results are returned.
pub fn search_documents(documents: &[Document], query: &str, limit: usize) -> Vec<SearchResult> {
    if limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = documents
        .iter()
        .filter_map(|doc| {
            let score = similarity(query, &searchable_text(doc));
            (score > 0.0).then(|| SearchResult {
                document: doc.clone(),
                similarity: score,
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.truncate(limit);
    results
}
