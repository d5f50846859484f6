//! Document store layer
//!
//! # Design Principles
//!
//! - One stored document per list; items live in its `todos` array
//! - Every operation is a single-document call, atomic in the store
//! - Updates report match and modified counts, handlers decide the 404
//! - No retries, no transactions

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::models::{ItemPatch, TodoItem, TodoList};

pub use memory::MemoryStore;
pub use mongo::{MongoConfig, MongoStore};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("bson encoding error: {0}")]
    Bson(#[from] bson::ser::Error),
}

/// Counts reported by a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matched by the filter (0 or 1)
    pub matched: u64,
    /// Documents whose stored value actually changed (0 or 1)
    pub modified: u64,
}

impl UpdateOutcome {
    pub const fn new(matched: u64, modified: u64) -> Self {
        Self { matched, modified }
    }
}

/// Single-document operations over the todo list collection.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Every list, in storage order.
    async fn find_all(&self) -> Result<Vec<TodoList>, StoreError>;

    /// One list by id.
    async fn find_list(&self, list_id: ObjectId) -> Result<Option<TodoList>, StoreError>;

    /// Insert a new list document.
    async fn insert_list(&self, list: &TodoList) -> Result<(), StoreError>;

    /// `$set` the name when given; no-op set otherwise.
    async fn rename_list(
        &self,
        list_id: ObjectId,
        name: Option<&str>,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the list and its items. Returns the deleted count.
    async fn delete_list(&self, list_id: ObjectId) -> Result<u64, StoreError>;

    /// `$push` an item onto the list's `todos`.
    async fn push_item(
        &self,
        list_id: ObjectId,
        item: &TodoItem,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Positional `$set` of the patch fields on the matching item.
    /// Matches only when the list contains the item.
    async fn update_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, StoreError>;

    /// `$pull` the item from the list's `todos`.
    async fn pull_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
    ) -> Result<UpdateOutcome, StoreError>;
}
