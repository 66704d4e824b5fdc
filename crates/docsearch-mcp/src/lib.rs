//! # DocSearch MCP
//!
//! Model Context Protocol support over newline-delimited JSON-RPC 2.0 on stdio.
//!
//! - [`server::McpServer`]: exposes the document store as MCP tools
//!   (`search_documents`, `get_all_documents`, `get_document`, `add_document`)
//! - [`client::McpClient`]: spawns an MCP server process, performs the
//!   handshake, discovers tools and calls them

pub mod client;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub use client::McpClient;
pub use server::McpServer;
pub use tools::DocumentTools;
pub use types::McpServerConfig;
