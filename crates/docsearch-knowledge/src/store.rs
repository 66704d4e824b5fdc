//! In-memory document store.

use std::sync::{RwLock, RwLockReadGuard};

use docsearch_core::types::{Document, SearchResult};

use crate::search::search_documents;
use crate::seed::seed_documents;

/// Append-only, ordered collection of documents.
///
/// Shared between front ends as `Arc<DocumentStore>`. Reads return owned
/// snapshots, so later additions are never observed through them.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `documents` in the given order.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Create a store holding the built-in documents.
    pub fn seeded() -> Self {
        Self::with_documents(seed_documents())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Document>> {
        // Writers only push, so a poisoned lock still holds a valid list.
        self.documents.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of every document, in insertion order.
    pub fn get_all(&self) -> Vec<Document> {
        self.read().clone()
    }

    /// First document whose id equals `id`.
    pub fn get_by_id(&self, id: &str) -> Option<Document> {
        self.read().iter().find(|d| d.id == id).cloned()
    }

    /// Append `doc`. Ids are not checked for uniqueness.
    pub fn add(&self, doc: Document) {
        tracing::debug!("Adding document '{}' ({})", doc.id, doc.metadata.title);
        self.documents
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(doc);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Rank the stored documents against `query`; see [`search_documents`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let docs = self.read();
        let results = search_documents(&docs, query, limit);
        tracing::debug!(
            "Search '{}' (limit {}) → {} of {} documents",
            query,
            limit,
            results.len(),
            docs.len()
        );
        results
    }
}
