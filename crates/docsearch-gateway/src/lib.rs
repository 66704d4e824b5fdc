//! # DocSearch Gateway
//!
//! HTTP front end: keyword search over the document store and
//! retrieval-augmented chat through the configured provider.
//!
//! | Method | Path      | Body                  |
//! |--------|-----------|-----------------------|
//! | GET    | `/health` |                       |
//! | POST   | `/search` | `{query, limit?}`     |
//! | POST   | `/chat`   | `{message, model?}`   |

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, build_router, start};
