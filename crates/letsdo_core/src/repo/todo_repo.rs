//! Todo list persistence on top of a key-value store.
//!
//! # Responsibility
//! - Mirror the whole in-memory list into one key as a JSON array.
//! - Reject malformed persisted data instead of handing it to callers.
//!
//! # Invariants
//! - Writes always replace the full list; there are no partial updates.
//! - A loaded list never contains duplicate ids or invalid records.

use crate::model::todo::Todo;
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{debug, warn};
use std::collections::HashSet;

/// Fixed key holding the serialized list.
pub const TODOS_KEY: &str = "todos";

/// Persistence adapter for the todo list.
pub struct TodoPersistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TodoPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes `todos` and overwrites the stored value.
    pub fn save(&self, todos: &[Todo]) -> RepoResult<()> {
        let blob = encode_todos(todos)?;
        self.store.set(TODOS_KEY, &blob)?;
        debug!(
            "event=todos_save module=repo status=ok count={} bytes={}",
            todos.len(),
            blob.len()
        );
        Ok(())
    }

    /// Reads the stored list.
    ///
    /// Returns `Ok(None)` when nothing was ever saved.
    ///
    /// # Errors
    /// - `InvalidData` when the stored value is not a valid todo list.
    /// - `Db` when the key-value store itself fails.
    pub fn load(&self) -> RepoResult<Option<Vec<Todo>>> {
        let Some(blob) = self.store.get(TODOS_KEY)? else {
            debug!("event=todos_load module=repo status=empty");
            return Ok(None);
        };

        match decode_todos(&blob) {
            Ok(todos) => {
                debug!(
                    "event=todos_load module=repo status=ok count={}",
                    todos.len()
                );
                Ok(Some(todos))
            }
            Err(err) => {
                warn!(
                    "event=todos_load module=repo status=error error_code=invalid_data bytes={}",
                    blob.len()
                );
                Err(err)
            }
        }
    }

    /// Removes the stored list; returns whether one existed.
    pub fn clear(&self) -> RepoResult<bool> {
        self.store.remove(TODOS_KEY)
    }
}

/// Encodes a list into the persisted JSON array format.
pub fn encode_todos(todos: &[Todo]) -> RepoResult<String> {
    serde_json::to_string(todos).map_err(RepoError::Serialization)
}

/// Decodes and validates a persisted JSON array.
pub fn decode_todos(blob: &str) -> RepoResult<Vec<Todo>> {
    let todos: Vec<Todo> =
        serde_json::from_str(blob).map_err(|err| RepoError::InvalidData(err.to_string()))?;

    let mut seen = HashSet::with_capacity(todos.len());
    for todo in &todos {
        if !seen.insert(&todo.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate todo id `{}`",
                todo.id
            )));
        }
    }

    Ok(todos)
}
