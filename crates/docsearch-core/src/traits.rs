//! Trait seams between the core and its collaborators.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatResponse, SearchResult};

/// A chat-completion backend that answers a message with retrieved context.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &str;

    /// The model used when a request does not name one.
    fn default_model(&self) -> &str;

    /// Send `message` plus the formatted `context` and wait for the reply.
    ///
    /// `model` overrides [`ChatProvider::default_model`] for this call only.
    async fn chat(
        &self,
        message: &str,
        context: &[SearchResult],
        model: Option<&str>,
    ) -> Result<ChatResponse>;
}
