//! # DocSearch Core
//!
//! Shared building blocks for every DocSearch crate:
//! - [`config`]: TOML + environment configuration
//! - [`error`]: the crate-wide error type
//! - [`types`]: documents, search results and chat usage
//! - [`traits`]: the chat provider seam used by the front ends

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::DocSearchConfig;
pub use error::{DocSearchError, Result};
pub use traits::ChatProvider;
pub use types::{ChatResponse, ChatUsage, Document, DocumentMetadata, SearchResult};
