//! MongoDB-backed store
//!
//! Builds the `$set` / `$push` / `$pull` update documents and hands each
//! one to a single driver call. The driver's client pools connections and
//! is shared across requests.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection};

use super::{StoreError, TodoStore, UpdateOutcome};
use crate::models::{ItemPatch, TodoItem, TodoList};

/// Default connection string
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/todo";

/// Database used when the URI names none
pub const DEFAULT_DATABASE: &str = "todo";

/// Default collection holding list documents
pub const DEFAULT_COLLECTION: &str = "todo";

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URI.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// Store over one MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<TodoList>,
}

impl MongoStore {
    /// Build a client from the config's URI.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI cannot be parsed.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        tracing::info!(
            database = %database.name(),
            collection = %config.collection,
            "MongoDB store configured"
        );

        Ok(Self::new(database.collection(&config.collection)))
    }

    pub fn new(collection: Collection<TodoList>) -> Self {
        Self { collection }
    }
}

/// `$set` document addressing the item matched by the positional operator.
fn positional_set(patch: &ItemPatch) -> Document {
    let mut set = Document::new();
    if let Some(text) = &patch.text {
        set.insert("todos.$.text", text.as_str());
    }
    if let Some(due_date) = patch.due_date {
        set.insert("todos.$.dueDate", due_date);
    }
    if let Some(finished) = patch.finished {
        set.insert("todos.$.finished", finished);
    }
    set
}

impl MongoStore {
    /// Apply `update` to the single document matching `filter`.
    ///
    /// An empty `$set` is answered by counting matches instead, which gives
    /// the same counts on servers that reject empty update operators.
    async fn update(&self, filter: Document, set: Document) -> Result<UpdateOutcome, StoreError> {
        if set.is_empty() {
            let matched = self.collection.count_documents(filter).limit(1).await?;
            return Ok(UpdateOutcome::new(matched, 0));
        }
        self.apply(filter, doc! { "$set": set }).await
    }

    async fn apply(&self, filter: Document, update: Document) -> Result<UpdateOutcome, StoreError> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<TodoList>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_list(&self, list_id: ObjectId) -> Result<Option<TodoList>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": list_id }).await?)
    }

    async fn insert_list(&self, list: &TodoList) -> Result<(), StoreError> {
        self.collection.insert_one(list).await?;
        Ok(())
    }

    async fn rename_list(
        &self,
        list_id: ObjectId,
        name: Option<&str>,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut set = Document::new();
        if let Some(name) = name {
            set.insert("name", name);
        }
        self.update(doc! { "_id": list_id }, set).await
    }

    async fn delete_list(&self, list_id: ObjectId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": list_id }).await?;
        Ok(result.deleted_count)
    }

    async fn push_item(
        &self,
        list_id: ObjectId,
        item: &TodoItem,
    ) -> Result<UpdateOutcome, StoreError> {
        let item = bson::to_bson(item)?;
        self.apply(doc! { "_id": list_id }, doc! { "$push": { "todos": item } })
            .await
    }

    async fn update_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
        patch: &ItemPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        self.update(
            doc! { "_id": list_id, "todos._id": item_id },
            positional_set(patch),
        )
        .await
    }

    async fn pull_item(
        &self,
        list_id: ObjectId,
        item_id: ObjectId,
    ) -> Result<UpdateOutcome, StoreError> {
        self.apply(
            doc! { "_id": list_id },
            doc! { "$pull": { "todos": { "_id": item_id } } },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017/todo");
        assert_eq!(config.collection, "todo");
    }

    #[test]
    fn positional_set_only_touches_present_fields() {
        let patch = ItemPatch {
            finished: Some(true),
            ..ItemPatch::default()
        };
        assert_eq!(positional_set(&patch), doc! { "todos.$.finished": true });
        assert!(positional_set(&ItemPatch::default()).is_empty());
    }

    // Integration tests require a running server
    // Run with: MONGO_URI=mongodb://localhost:27017/todo_test cargo test -p todolists-server -- --ignored

    async fn test_store() -> MongoStore {
        let uri = std::env::var("MONGO_URI").expect("MONGO_URI required");
        let config = MongoConfig {
            uri,
            collection: format!("todo_test_{}", ObjectId::new().to_hex()),
        };
        MongoStore::connect(&config).await.expect("client creation failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn item_update_reports_counts() {
        let store = test_store().await;
        let list = TodoList::new("groceries");
        store.insert_list(&list).await.unwrap();

        let item = crate::models::NewItem {
            text: "milk".into(),
            due_date: bson::DateTime::from_millis(0),
            finished: false,
        }
        .into_item();
        let pushed = store.push_item(list.id, &item).await.unwrap();
        assert_eq!(pushed, UpdateOutcome::new(1, 1));

        let patch = ItemPatch {
            finished: Some(true),
            ..ItemPatch::default()
        };
        let first = store.update_item(list.id, item.id, &patch).await.unwrap();
        assert_eq!(first, UpdateOutcome::new(1, 1));
        let again = store.update_item(list.id, item.id, &patch).await.unwrap();
        assert_eq!(again, UpdateOutcome::new(1, 0));

        let missing = store
            .update_item(list.id, ObjectId::new(), &patch)
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::new(0, 0));

        store.collection.drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pull_and_delete_report_counts() {
        let store = test_store().await;
        let list = TodoList::new("chores");
        store.insert_list(&list).await.unwrap();

        let pulled = store.pull_item(list.id, ObjectId::new()).await.unwrap();
        assert_eq!(pulled, UpdateOutcome::new(1, 0));

        assert_eq!(store.delete_list(list.id).await.unwrap(), 1);
        assert_eq!(store.delete_list(list.id).await.unwrap(), 0);
        assert!(store.find_list(list.id).await.unwrap().is_none());

        store.collection.drop().await.unwrap();
    }
}
