//! Data types shared between the store, the search engine and the front ends.

use serde::{Deserialize, Serialize};

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub category: String,
}

/// A stored text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: DocumentMetadata {
                title: title.into(),
                category: category.into(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

/// A document annotated with its similarity to a query.
///
/// Serializes flat: the document fields plus `similarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub document: Document,
    pub similarity: f64,
}

/// Token accounting reported by the completion endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Reply from a chat provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    pub usage: ChatUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_serializes_flat() {
        let result = SearchResult {
            document: Document::new("doc1", "body", "Title", "AI"),
            similarity: 0.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id"], "doc1");
        assert_eq!(json["metadata"]["title"], "Title");
        assert_eq!(json["similarity"], 0.5);
        assert!(json.get("document").is_none());
    }

    #[test]
    fn test_title_reads_metadata() {
        let doc = Document::new("doc2", "body", "React Introduction", "Web Development");
        assert_eq!(doc.title(), "React Introduction");
    }

    #[test]
    fn test_usage_is_camel_case() {
        let usage = ChatUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        };
        let json = serde_json::to_value(usage).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"promptTokens": 1, "completionTokens": 2, "totalTokens": 3})
        );
    }
}
