//! todolists-server: HTTP API over todo lists stored as MongoDB documents
//!
//! Each list is one document holding its items in an embedded `todos`
//! array. Every handler validates its input, issues exactly one store
//! operation, and maps the result to a status code.

pub mod db;
pub mod encode;
pub mod http;
pub mod models;

pub use db::{MemoryStore, MongoConfig, MongoStore, StoreError, TodoStore, UpdateOutcome};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
