//! Document tools exposed over MCP.
//!
//! Each tool takes JSON arguments and produces the text of a single
//! `text` content block: a pretty-printed JSON payload.

use std::sync::Arc;

use docsearch_core::error::{DocSearchError, Result};
use docsearch_core::types::Document;
use docsearch_knowledge::{DocumentStore, resolve_limit};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::types::ToolDefinition;

pub const SEARCH_DOCUMENTS: &str = "search_documents";
pub const GET_ALL_DOCUMENTS: &str = "get_all_documents";
pub const GET_DOCUMENT: &str = "get_document";
pub const ADD_DOCUMENT: &str = "add_document";

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GetDocumentArgs {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AddDocumentArgs {
    id: String,
    content: String,
    title: String,
    #[serde(default = "default_category")]
    category: String,
}

fn default_category() -> String {
    "General".into()
}

/// The document tool set, bound to a shared store.
#[derive(Clone)]
pub struct DocumentTools {
    store: Arc<DocumentStore>,
    default_limit: usize,
}

impl DocumentTools {
    pub fn new(store: Arc<DocumentStore>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    /// Definitions advertised by `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: SEARCH_DOCUMENTS.into(),
                description: Some("Search for documents using keyword similarity".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query to find relevant documents"
                        },
                        "limit": {
                            "type": "number",
                            "description": format!("Maximum number of results to return (default: {})", self.default_limit),
                            "default": self.default_limit
                        }
                    },
                    "required": ["query"]
                })),
            },
            ToolDefinition {
                name: GET_ALL_DOCUMENTS.into(),
                description: Some("Get all available documents".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {}
                })),
            },
            ToolDefinition {
                name: GET_DOCUMENT.into(),
                description: Some("Get a specific document by ID".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "The document ID to retrieve" }
                    },
                    "required": ["id"]
                })),
            },
            ToolDefinition {
                name: ADD_DOCUMENT.into(),
                description: Some("Append a document to the collection".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Document ID" },
                        "content": { "type": "string", "description": "Document text" },
                        "title": { "type": "string", "description": "Document title" },
                        "category": { "type": "string", "description": "Category (default: General)" }
                    },
                    "required": ["id", "content", "title"]
                })),
            },
        ]
    }

    /// Run tool `name` with `arguments` and return the output text.
    ///
    /// A missing document is a normal result, not an error.
    pub fn call(&self, name: &str, arguments: Value) -> Result<String> {
        tracing::debug!("Tool call: {}", name);
        match name {
            SEARCH_DOCUMENTS => {
                let args: SearchArgs = parse_args(name, arguments)?;
                let limit = resolve_limit(args.limit, self.default_limit);
                let results = self.store.search(&args.query, limit);
                pretty(&json!({
                    "query": args.query,
                    "total_results": results.len(),
                    "results": results,
                }))
            }
            GET_ALL_DOCUMENTS => {
                let documents = self.store.get_all();
                pretty(&json!({
                    "total": documents.len(),
                    "documents": documents,
                }))
            }
            GET_DOCUMENT => {
                let args: GetDocumentArgs = parse_args(name, arguments)?;
                match self.store.get_by_id(&args.id) {
                    Some(doc) => pretty(&doc),
                    None => Ok(json!({ "error": "Document not found" }).to_string()),
                }
            }
            ADD_DOCUMENT => {
                let args: AddDocumentArgs = parse_args(name, arguments)?;
                let doc = Document::new(args.id, args.content, args.title, args.category);
                self.store.add(doc.clone());
                pretty(&json!({
                    "added": doc,
                    "total": self.store.len(),
                }))
            }
            other => Err(DocSearchError::UnknownTool(other.to_string())),
        }
    }
}

/// Tools without parameters may be called with `null` arguments.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments)
        .map_err(|e| DocSearchError::Validation(format!("Invalid arguments for {tool}: {e}")))
}

fn pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> DocumentTools {
        DocumentTools::new(Arc::new(DocumentStore::seeded()), 5)
    }

    fn call_json(tools: &DocumentTools, name: &str, args: Value) -> Value {
        serde_json::from_str(&tools.call(name, args).unwrap()).unwrap()
    }

    #[test]
    fn test_definitions() {
        let names: Vec<String> = tools().definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["search_documents", "get_all_documents", "get_document", "add_document"]
        );
    }

    #[test]
    fn test_search_documents() {
        let out = call_json(
            &tools(),
            SEARCH_DOCUMENTS,
            json!({"query": "machine learning", "limit": 2}),
        );
        assert_eq!(out["query"], "machine learning");
        assert_eq!(out["total_results"], 2);
        assert_eq!(out["results"][0]["id"], "doc1");
        assert_eq!(out["results"][0]["similarity"], 1.0);
        assert_eq!(out["results"][0]["metadata"]["title"], "Machine Learning Basics");
    }

    #[test]
    fn test_search_default_limit() {
        let out = call_json(&tools(), SEARCH_DOCUMENTS, json!({"query": ""}));
        assert_eq!(out["total_results"], 5);
    }

    #[test]
    fn test_search_non_positive_limit() {
        let out = call_json(&tools(), SEARCH_DOCUMENTS, json!({"query": "rum", "limit": 0}));
        assert_eq!(out["total_results"], 0);
        let out = call_json(&tools(), SEARCH_DOCUMENTS, json!({"query": "rum", "limit": -1}));
        assert_eq!(out["results"], json!([]));
    }

    #[test]
    fn test_search_requires_query() {
        let err = tools().call(SEARCH_DOCUMENTS, json!({"limit": 2})).unwrap_err();
        assert!(matches!(err, DocSearchError::Validation(_)));
    }

    #[test]
    fn test_get_all_documents() {
        let out = call_json(&tools(), GET_ALL_DOCUMENTS, Value::Null);
        assert_eq!(out["total"], 5);
        assert_eq!(out["documents"][4]["id"], "doc5");
    }

    #[test]
    fn test_get_document() {
        let out = call_json(&tools(), GET_DOCUMENT, json!({"id": "doc5"}));
        assert_eq!(out["metadata"]["title"], "The Wellerman Sea Shanty");

        let text = tools().call(GET_DOCUMENT, json!({"id": "doc99"})).unwrap();
        assert_eq!(text, r#"{"error":"Document not found"}"#);
    }

    #[test]
    fn test_add_document() {
        let tools = tools();
        let out = call_json(
            &tools,
            ADD_DOCUMENT,
            json!({"id": "doc6", "content": "MCP links agents to tools.", "title": "MCP Protocol"}),
        );
        assert_eq!(out["total"], 6);
        assert_eq!(out["added"]["metadata"]["category"], "General");

        let fetched = call_json(&tools, GET_DOCUMENT, json!({"id": "doc6"}));
        assert_eq!(fetched["content"], "MCP links agents to tools.");
    }

    #[test]
    fn test_unknown_tool() {
        let err = tools().call("drop_table", json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: drop_table");
    }
}
