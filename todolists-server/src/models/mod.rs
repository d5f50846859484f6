//! Domain models and request payloads
//!
//! Payload types accept loosely-typed JSON and are converted into
//! validated values before any store call. Invalid input returns
//! ValidationError, not panic.

pub mod object_id;
pub mod todo_item;
pub mod todo_list;
pub mod validation;

pub use object_id::{parse_id, validate_ids, OBJECT_ID_LEN};
pub use todo_item::{ItemFields, ItemPatch, NewItem, TodoItem};
pub use todo_list::{ListFields, TodoList};
pub use validation::ValidationError;
