//! Presentation view model.
//!
//! # Responsibility
//! - Derive everything a front-end needs to draw the list from store state.
//!
//! # Invariants
//! - Building a view never mutates the store.
//! - `rows` follows list order filtered by `show_finished`.

use crate::model::todo::{Todo, TodoId};
use crate::repo::kv_store::KeyValueStore;
use crate::service::todo_store::TodoStore;

/// Shown when no row survives the filter.
pub const EMPTY_MESSAGE: &str = "No Todos to display";

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub text: String,
    pub is_completed: bool,
    pub created_at: String,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            text: todo.text.clone(),
            is_completed: todo.is_completed,
            created_at: todo.created_at.clone(),
        }
    }
}

/// Snapshot of the store as the list screen shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListView {
    pub rows: Vec<TodoRow>,
    pub show_finished: bool,
    pub staged: String,
    /// Whether the add control is enabled.
    pub can_submit: bool,
    pub total: usize,
    pub completed: usize,
    pub empty_message: Option<&'static str>,
}

impl TodoListView {
    pub fn from_store<S: KeyValueStore>(store: &TodoStore<S>) -> Self {
        let rows: Vec<TodoRow> = store.visible().map(TodoRow::from).collect();
        let empty_message = rows.is_empty().then_some(EMPTY_MESSAGE);

        Self {
            rows,
            show_finished: store.show_finished(),
            staged: store.staged().to_string(),
            can_submit: store.can_submit(),
            total: store.todos().len(),
            completed: store
                .todos()
                .iter()
                .filter(|todo| todo.is_completed)
                .count(),
            empty_message,
        }
    }
}
