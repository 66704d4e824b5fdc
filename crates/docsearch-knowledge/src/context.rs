//! Renders search results as a context block for a chat prompt.

use docsearch_core::types::SearchResult;

/// First line of every non-empty context block.
pub const CONTEXT_HEADER: &str = "Relevant documents:";

/// Format `results` as `Relevant documents:` followed by one
/// `- {title}: {content}` line per result, in order.
///
/// No results yields an empty string so the block can be left out entirely.
pub fn format_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CONTEXT_HEADER.to_string());
    lines.extend(
        results
            .iter()
            .map(|r| format!("- {}: {}", r.document.title(), r.document.content)),
    );
    lines.join("\n")
}
