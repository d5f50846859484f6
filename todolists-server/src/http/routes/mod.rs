//! Route handlers organized by resource

pub mod items;
pub mod lists;

use axum::Json;
use serde::Serialize;

/// `{"msg": ...}` body for successful writes
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub msg: &'static str,
}

impl StatusMessage {
    pub fn json(msg: &'static str) -> Json<Self> {
        Json(Self { msg })
    }
}
