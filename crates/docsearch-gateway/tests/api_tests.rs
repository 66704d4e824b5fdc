use async_trait::async_trait;
use docsearch_core::config::SearchConfig;
use docsearch_core::error::{DocSearchError, Result};
use docsearch_core::types::{ChatResponse, ChatUsage, Document, SearchResult};
use docsearch_core::ChatProvider;
use docsearch_gateway::{AppState, build_router};
use docsearch_knowledge::DocumentStore;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Records what it was asked and answers with a canned reply.
#[derive(Default)]
struct RecordingProvider {
    calls: Mutex<Vec<(String, Vec<String>, Option<String>)>>,
    fail_with: Option<(u16, String)>,
}

#[async_trait]
impl ChatProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn chat(
        &self,
        message: &str,
        context: &[SearchResult],
        model: Option<&str>,
    ) -> Result<ChatResponse> {
        self.calls.lock().unwrap().push((
            message.to_string(),
            context.iter().map(|r| r.document.id.clone()).collect(),
            model.map(String::from),
        ));
        if let Some((status, body)) = &self.fail_with {
            return Err(DocSearchError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(ChatResponse {
            text: "Machine learning lets computers learn from data.".into(),
            usage: ChatUsage {
                prompt_tokens: 30,
                completion_tokens: 9,
                total_tokens: 39,
            },
        })
    }
}

async fn spawn_app(store: DocumentStore, provider: Arc<RecordingProvider>) -> String {
    let app = build_router(AppState {
        store: Arc::new(store),
        provider,
        search: SearchConfig::default(),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn spawn_seeded() -> (String, Arc<RecordingProvider>) {
    let provider = Arc::new(RecordingProvider::default());
    let base_url = spawn_app(DocumentStore::seeded(), provider.clone()).await;
    (base_url, provider)
}

async fn post_json(url: String, body: Value) -> (u16, Value) {
    let resp = Client::new().post(url).json(&body).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let (base_url, _) = spawn_seeded().await;
    let resp = Client::new()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_search() {
    let (base_url, _) = spawn_seeded().await;
    let (status, body) = post_json(
        format!("{}/search", base_url),
        json!({"query": "machine learning", "limit": 2}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["query"], "machine learning");
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"][0]["id"], "doc1");
    assert_eq!(body["results"][0]["similarity"], 1.0);
    assert_eq!(body["results"][0]["metadata"]["category"], "AI");
}

#[tokio::test]
async fn test_search_default_limit_is_five() {
    let store = DocumentStore::new();
    for i in 0..8 {
        store.add(Document::new(format!("d{i}"), "rust", "Rust", "Lang"));
    }
    let base_url = spawn_app(store, Arc::new(RecordingProvider::default())).await;

    let (status, body) = post_json(format!("{}/search", base_url), json!({"query": "rust"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 5);
    assert_eq!(body["results"][0]["id"], "d0");
    assert_eq!(body["results"][4]["id"], "d4");
}

#[tokio::test]
async fn test_search_zero_limit() {
    let (base_url, _) = spawn_seeded().await;
    let (status, body) = post_json(
        format!("{}/search", base_url),
        json!({"query": "wellerman", "limit": 0}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_search_requires_query() {
    let (base_url, _) = spawn_seeded().await;
    let (status, body) = post_json(format!("{}/search", base_url), json!({"limit": 3})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Query is required");

    let (status, _) = post_json(format!("{}/search", base_url), json!({"query": ""})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_malformed_body_is_500() {
    let (base_url, _) = spawn_seeded().await;
    let resp = Client::new()
        .post(format!("{}/search", base_url))
        .header("Content-Type", "application/json")
        .body("{\"query\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn test_chat() {
    let (base_url, provider) = spawn_seeded().await;
    let (status, body) = post_json(
        format!("{}/chat", base_url),
        json!({"message": "machine learning"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["response"], "Machine learning lets computers learn from data.");
    assert_eq!(
        body["usage"],
        json!({"promptTokens": 30, "completionTokens": 9, "totalTokens": 39})
    );
    assert_eq!(body["documentsUsed"], 3);
    assert_eq!(body["documents"].as_array().unwrap().len(), 3);
    assert_eq!(body["documents"][0]["title"], "Machine Learning Basics");
    assert_eq!(body["documents"][0]["similarity"], 1.0);

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "machine learning");
    assert_eq!(calls[0].1.len(), 3);
    assert_eq!(calls[0].1[0], "doc1");
    assert_eq!(calls[0].2.as_deref(), Some("test-model"));
}

#[tokio::test]
async fn test_chat_passes_model_override() {
    let (base_url, provider) = spawn_seeded().await;
    let (status, _) = post_json(
        format!("{}/chat", base_url),
        json!({"message": "vector", "model": "llama3.2"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        provider.calls.lock().unwrap()[0].2.as_deref(),
        Some("llama3.2")
    );
}

#[tokio::test]
async fn test_chat_empty_model_uses_provider_default() {
    let (base_url, provider) = spawn_seeded().await;
    let (status, _) = post_json(
        format!("{}/chat", base_url),
        json!({"message": "vector", "model": ""}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        provider.calls.lock().unwrap()[0].2.as_deref(),
        Some("test-model")
    );
}

#[tokio::test]
async fn test_chat_without_matches_sends_no_context() {
    let provider = Arc::new(RecordingProvider::default());
    let base_url = spawn_app(DocumentStore::new(), provider.clone()).await;

    let (status, body) =
        post_json(format!("{}/chat", base_url), json!({"message": "What is ML?"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["documentsUsed"], 0);
    assert_eq!(body["documents"], json!([]));

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls[0].0, "What is ML?");
    assert!(calls[0].1.is_empty());
}

#[tokio::test]
async fn test_chat_requires_message() {
    let (base_url, provider) = spawn_seeded().await;
    let (status, body) = post_json(format!("{}/chat", base_url), json!({"model": "x"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Message is required");
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_provider_error_is_500() {
    let provider = Arc::new(RecordingProvider {
        fail_with: Some((401, "invalid api key".into())),
        ..Default::default()
    });
    let base_url = spawn_app(DocumentStore::seeded(), provider).await;

    let (status, body) = post_json(format!("{}/chat", base_url), json!({"message": "hi"})).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "API error: 401 - invalid api key");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (base_url, _) = spawn_seeded().await;
    let resp = Client::new()
        .post(format!("{}/documents", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "Not Found");
}
