//! Todo list document and its request payload

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::todo_item::TodoItem;
use super::ValidationError;

/// A todo list as stored: one document per list, items embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Owned items in insertion order. Documents written without the
    /// field read back as empty.
    #[serde(default)]
    pub todos: Vec<TodoItem>,
}

impl TodoList {
    /// New list with a fresh id and no items.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Look up an embedded item by id.
    #[cfg(test)]
    pub fn item(&self, item_id: ObjectId) -> Option<&TodoItem> {
        self.todos.iter().find(|item| item.id == item_id)
    }
}

/// Body of `POST /todolists` and `PUT /todolists/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct ListFields {
    #[serde(default)]
    name: Option<Value>,
}

impl ListFields {
    /// Name for a new list. Required.
    pub fn into_required_name(self) -> Result<String, ValidationError> {
        self.into_optional_name()?
            .ok_or(ValidationError::MissingField { field: "name" })
    }

    /// Name for a rename. Absent or null means "leave as is".
    pub fn into_optional_name(self) -> Result<Option<String>, ValidationError> {
        match self.name {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) => Ok(Some(name)),
            Some(other) => Err(ValidationError::invalid(
                "name",
                format!("expected a string, got {other}"),
            )),
        }
    }
}
