//! OpenAI-compatible chat client.
//!
//! Sends a single, non-streaming chat completion per request: a fixed system
//! instruction plus one user message carrying the question and, when search
//! found anything, the formatted document context. No retries and no
//! timeout are applied here.

use async_trait::async_trait;
use docsearch_core::config::LlmConfig;
use docsearch_core::error::{DocSearchError, Result};
use docsearch_core::traits::ChatProvider;
use docsearch_core::types::{ChatResponse, ChatUsage, SearchResult};
use docsearch_knowledge::format_context;
use serde::Serialize;
use serde_json::{Value, json};

/// System instruction sent with every chat request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Use the provided document context to answer questions accurately.";

/// A single chat message in OpenAI wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Build the user message: `message` alone, or `message`, a blank line and
/// the context block.
pub fn compose_user_message(message: &str, context: &[SearchResult]) -> String {
    let context_text = format_context(context);
    if context_text.is_empty() {
        message.to_string()
    } else {
        format!("{message}\n\n{context_text}")
    }
}

/// Build the system + user message pair for a request.
pub fn build_messages(message: &str, context: &[SearchResult]) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user",
            content: compose_user_message(message, context),
        },
    ]
}

/// A chat provider for any API speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompatibleProvider {
    /// API key sent as a bearer token.
    api_key: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    base_url: String,
    /// Path for chat completions.
    chat_path: String,
    /// Model used when a request names none.
    model: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_path: "/chat/completions".to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.base_url, &config.api_key, &config.model)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    fn request_body(&self, message: &str, context: &[SearchResult], model: &str) -> Value {
        json!({
            "model": model,
            "messages": build_messages(message, context),
        })
    }
}

/// Pull the reply text and token usage out of a completion response.
///
/// Missing or non-numeric usage fields count as zero. Whole-number floats
/// such as `12.0` are accepted.
pub fn parse_completion(json: &Value) -> Result<ChatResponse> {
    let text = json["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .ok_or_else(|| {
            DocSearchError::InvalidResponse("missing choices[0].message.content".into())
        })?
        .to_string();

    let count = |key: &str| {
        let field = &json["usage"][key];
        field
            .as_u64()
            .or_else(|| {
                field
                    .as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0)
    };
    let usage = ChatUsage {
        prompt_tokens: count("prompt_tokens"),
        completion_tokens: count("completion_tokens"),
        total_tokens: count("total_tokens"),
    };

    Ok(ChatResponse { text, usage })
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn chat(
        &self,
        message: &str,
        context: &[SearchResult],
        model: Option<&str>,
    ) -> Result<ChatResponse> {
        let model = model.filter(|m| !m.is_empty()).unwrap_or(&self.model);
        let body = self.request_body(message, context, model);
        let url = self.endpoint();

        tracing::debug!(
            "Chat request → {} (model={}, context_docs={})",
            url,
            model,
            context.len()
        );

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DocSearchError::Http(format!("connection failed ({url}): {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!("Chat endpoint returned {}", status);
            return Err(DocSearchError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| DocSearchError::InvalidResponse(e.to_string()))?;

        let reply = parse_completion(&json)?;
        tracing::debug!("Chat reply: {} tokens", reply.usage.total_tokens);
        Ok(reply)
    }
}
