//! API route handlers for the gateway.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{Json, extract::State};
use docsearch_knowledge::resolve_limit;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

use super::error::ApiError;
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Parse a JSON body. A malformed body is a server-side failure (500),
/// while missing fields are checked by each handler (400).
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Internal(format!("Invalid JSON body: {e}")))
}

/// Take a required, non-empty string field.
fn required(field: Option<String>, message: &str) -> Result<String, ApiError> {
    field
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Keyword search over the document store.
pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: SearchRequest = parse_body(&body)?;
    let query = required(req.query, "Query is required")?;
    let limit = resolve_limit(req.limit, state.search.default_limit);

    let results = state.store.search(&query, limit);
    Ok(Json(json!({
        "query": query,
        "total": results.len(),
        "results": results,
    })))
}

/// Retrieval-augmented chat: search for context, then ask the provider.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: ChatRequest = parse_body(&body)?;
    let message = required(req.message, "Message is required")?;

    let results = state.store.search(&message, state.search.chat_context_limit);
    let model = req
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.provider.default_model());
    tracing::info!(
        "💬 Chat request ({} context document(s), provider={}, model={})",
        results.len(),
        state.provider.name(),
        model
    );

    let reply = state
        .provider
        .chat(&message, &results, Some(model))
        .await
        .map_err(|e| {
            tracing::error!("Chat failed: {e}");
            ApiError::from(e)
        })?;

    let documents: Vec<Value> = results
        .iter()
        .map(|r| json!({ "title": r.document.title(), "similarity": r.similarity }))
        .collect();

    Ok(Json(json!({
        "response": reply.text,
        "usage": reply.usage,
        "documentsUsed": results.len(),
        "documents": documents,
    })))
}

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
