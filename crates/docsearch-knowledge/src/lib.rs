//! # DocSearch Knowledge
//!
//! Ultra-lightweight retrieval for a small, fixed document collection.
//! No index, no embeddings, no persistence.
//!
//! ## Design
//! - **In-memory store**: append-only list of documents, seeded at startup
//! - **Keyword overlap**: fraction of query words that substring-match a document word
//! - **Linear scan**: every query scores every document, then sorts and truncates
//! - **Context block**: top results rendered as plain text for a chat prompt
//!
//! ## How it works
//! ```text
//! User: "What is machine learning?"
//!   ↓
//! store.search("what is machine learning?", 3)
//!   ↓ word overlap, stable sort
//! Top 3 documents
//!   ↓
//! format_context() → "Relevant documents:\n- Machine Learning Basics: ..."
//!   ↓
//! Appended to the user message sent to the chat endpoint
//! ```

pub mod context;
pub mod search;
pub mod seed;
pub mod store;

pub use context::{CONTEXT_HEADER, format_context};
pub use search::{resolve_limit, search_documents, similarity};
pub use store::DocumentStore;
