//! HTTP layer
//!
//! Axum server with:
//! - JSON content-type gate on every request
//! - Request tracing
//! - Graceful shutdown
//! - `{"msg": ...}` error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
