//! # DocSearch Providers
//!
//! Chat-completion clients for DocSearch.
//!
//! Any OpenAI-compatible API (OpenAI, Groq, Ollama, LM Studio, OpenRouter)
//! is handled by [`OpenAiCompatibleProvider`]; they differ only in base URL,
//! API key and model name.

pub mod openai_compatible;

use docsearch_core::ChatProvider;
use docsearch_core::config::LlmConfig;

pub use openai_compatible::OpenAiCompatibleProvider;

/// Create the chat provider described by `config`.
pub fn create_provider(config: &LlmConfig) -> Box<dyn ChatProvider> {
    Box::new(OpenAiCompatibleProvider::from_config(config))
}
