//! In-process store with the same count semantics as MongoDB
//!
//! Used by the router tests and by `todolists serve --memory`. Each call
//! takes the lock once, so every operation is atomic like a single-document
//! update in the real store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore, UpdateOutcome};
use crate::models::{ItemPatch, TodoItem, TodoList};

#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: RwLock<Vec<TodoList>>,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::Relaxed)
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<TodoList>, StoreError> {
        self.record();
        Ok(self.lists.read().await.clone())
    }

    async fn find_list(&self, list_id: ObjectId) -> Result<Option<TodoList>, StoreError> {
        self.record();
        let lists = self.lists.read().await;
        Ok(lists.iter().find(|list| list.id == list_id).cloned())
    }

    async fn insert_list(&self, list: &TodoList) -> Result<(), StoreError> {
        self.record();
        self.lists.write().await.push(list.clone());
        Ok(())
    }

    async fn rename_list(
        &self,
        list_id: ObjectId,
        name: Option<&str>,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record();
        let mut lists = self.lists.write().await;
        let Some(list) = lists.iter_mut().find(|list| list.id == list_id) else {
            return Ok(UpdateOutcome::default());
        };
        let modified = match name {
            Some(name) if list.name != name => {
                list.name = name.to_owned();
                1
            }
            _ => 0,
        };
        Ok(UpdateOutcome::new(1, modified))
    }

    async fn delete_list(&self, list_id: ObjectId) -> Result<u64, StoreError> {
        self.record();
        let mut lists = self.lists.write().await;
        let before = lists.len();
        // Ids are unique, so at most one document goes
        lists.retain(|list| list.id != list_id);
        Ok((before - lists.len()) as u64)
    }

    async fn push_item(
        &self,
        list_id: ObjectId,
        item: &TodoItem,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record();
        let mut lists = self.lists.write().await;
        match lists.iter_mut().find(|list| list.id == list_id) {
            Some(list) => {
                list.todos.push(item.clone());
                Ok(UpdateOutcome::new(1, 1))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn update_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record();
        let mut lists = self.lists.write().await;
        let item = lists
            .iter_mut()
            .filter(|list| list.id == list_id)
            .find_map(|list| list.todos.iter_mut().find(|item| item.id == item_id));

        match item {
            Some(item) => {
                let modified = u64::from(patch.apply(item));
                Ok(UpdateOutcome::new(1, modified))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn pull_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record();
        let mut lists = self.lists.write().await;
        let Some(list) = lists.iter_mut().find(|list| list.id == list_id) else {
            return Ok(UpdateOutcome::default());
        };
        let before = list.todos.len();
        list.todos.retain(|item| item.id != item_id);
        let modified = u64::from(list.todos.len() != before);
        Ok(UpdateOutcome::new(1, modified))
    }
}
