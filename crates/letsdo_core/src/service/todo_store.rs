//! Session store for the todo list.
//!
//! # Responsibility
//! - Own the in-memory list, the staged input and the show-finished flag.
//! - Persist the full list after every mutation, then notify subscribers.
//!
//! # Invariants
//! - The in-memory list is the source of truth for the session.
//! - Records are located by id, never by position.
//! - Rejected input and unknown ids leave list, staged input and storage
//!   untouched.
//! - `show_finished` is session-only and never persisted.

use crate::model::todo::{Todo, TodoId, TodoValidationError};
use crate::repo::kv_store::{KeyValueStore, RepoError};
use crate::repo::todo_repo::TodoPersistence;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input was refused before anything changed.
    Rejected(TodoValidationError),
    /// Persisting or reading the list failed.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "rejected: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TodoValidationError> for StoreError {
    fn from(value: TodoValidationError) -> Self {
        Self::Rejected(value)
    }
}

/// Change notification delivered after a mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded {
        count: usize,
        recovered_from_corrupt: bool,
    },
    Added {
        id: TodoId,
    },
    EditStaged {
        id: TodoId,
    },
    Deleted {
        id: TodoId,
    },
    CompletionToggled {
        id: TodoId,
        is_completed: bool,
    },
    ShowFinishedToggled {
        show_finished: bool,
    },
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// In-memory todo list bound to a persistence adapter.
pub struct TodoStore<S: KeyValueStore> {
    persistence: TodoPersistence<S>,
    todos: Vec<Todo>,
    staged: String,
    show_finished: bool,
    recovered_from_corrupt: bool,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Loads the persisted list into a new session.
    ///
    /// Missing data starts an empty list. Corrupt data also starts an empty
    /// list and is logged; it stays on disk until the next mutation
    /// overwrites it.
    ///
    /// # Errors
    /// - `Repo` when the key-value store cannot be read.
    pub fn load(persistence: TodoPersistence<S>) -> StoreResult<Self> {
        let (todos, recovered_from_corrupt) = match persistence.load() {
            Ok(Some(todos)) => (todos, false),
            Ok(None) => (Vec::new(), false),
            Err(RepoError::InvalidData(message)) => {
                warn!(
                    "event=store_load module=store status=recovered error_code=invalid_data error={message}"
                );
                (Vec::new(), true)
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "event=store_load module=store status=ok count={} recovered={}",
            todos.len(),
            recovered_from_corrupt
        );

        Ok(Self {
            persistence,
            todos,
            staged: String::new(),
            show_finished: true,
            recovered_from_corrupt,
            observers: Vec::new(),
        })
    }

    /// Registers a callback invoked after each successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Event describing the initial load, for late subscribers.
    pub fn load_event(&self) -> StoreEvent {
        StoreEvent::Loaded {
            count: self.todos.len(),
            recovered_from_corrupt: self.recovered_from_corrupt,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Records passing the show-finished filter, in list order.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> + '_ {
        let show_finished = self.show_finished;
        self.todos
            .iter()
            .filter(move |todo| todo.is_visible(show_finished))
    }

    pub fn staged(&self) -> &str {
        &self.staged
    }

    pub fn set_staged(&mut self, text: impl Into<String>) {
        self.staged = text.into();
    }

    pub fn show_finished(&self) -> bool {
        self.show_finished
    }

    pub fn persistence(&self) -> &TodoPersistence<S> {
        &self.persistence
    }

    /// Appends a new todo built from `text` and clears the staged input.
    ///
    /// # Errors
    /// - `Rejected` when trimmed `text` is too short; nothing changes.
    /// - `Repo` when persisting fails; the in-memory list is rolled back.
    pub fn add(&mut self, text: &str) -> StoreResult<TodoId> {
        let todo = match Todo::new(text) {
            Ok(todo) => todo,
            Err(err) => {
                debug!("event=todo_add module=store status=rejected reason={err}");
                return Err(err.into());
            }
        };
        let id = todo.id.clone();

        self.todos.push(todo);
        if let Err(err) = self.persistence.save(&self.todos) {
            self.todos.pop();
            return Err(err.into());
        }
        self.staged.clear();

        info!(
            "event=todo_add module=store status=ok count={}",
            self.todos.len()
        );
        self.notify(&StoreEvent::Added { id: id.clone() });
        Ok(id)
    }

    /// Submits the staged input through [`TodoStore::add`].
    pub fn submit_staged(&mut self) -> StoreResult<TodoId> {
        let text = self.staged.clone();
        self.add(&text)
    }

    /// Whether the staged input would currently be accepted by `add`.
    pub fn can_submit(&self) -> bool {
        crate::model::todo::check_new_text(&self.staged).is_ok()
    }

    /// Removes the todo and moves its text into the staged input.
    ///
    /// Returns `false` without side effects when `id` is unknown.
    pub fn begin_edit(&mut self, id: &TodoId) -> StoreResult<bool> {
        let Some(removed) = self.remove_persisted(id)? else {
            debug!("event=todo_edit module=store status=not_found");
            return Ok(false);
        };
        self.staged = removed.text;

        info!(
            "event=todo_edit module=store status=ok count={}",
            self.todos.len()
        );
        self.notify(&StoreEvent::EditStaged { id: id.clone() });
        Ok(true)
    }

    /// Removes the todo with `id`; returns `false` when it does not exist.
    pub fn delete(&mut self, id: &TodoId) -> StoreResult<bool> {
        if self.remove_persisted(id)?.is_none() {
            debug!("event=todo_delete module=store status=not_found");
            return Ok(false);
        }

        info!(
            "event=todo_delete module=store status=ok count={}",
            self.todos.len()
        );
        self.notify(&StoreEvent::Deleted { id: id.clone() });
        Ok(true)
    }

    /// Flips completion of the todo with `id`.
    ///
    /// Returns the new flag, or `None` when `id` is unknown.
    pub fn toggle_complete(&mut self, id: &TodoId) -> StoreResult<Option<bool>> {
        let Some(index) = self.position(id) else {
            debug!("event=todo_toggle module=store status=not_found");
            return Ok(None);
        };

        let is_completed = self.todos[index].toggle_completed();
        if let Err(err) = self.persistence.save(&self.todos) {
            self.todos[index].toggle_completed();
            return Err(err.into());
        }

        info!("event=todo_toggle module=store status=ok completed={is_completed}");
        self.notify(&StoreEvent::CompletionToggled {
            id: id.clone(),
            is_completed,
        });
        Ok(Some(is_completed))
    }

    /// Flips the session-only show-finished flag and returns the new value.
    pub fn toggle_show_finished(&mut self) -> bool {
        self.show_finished = !self.show_finished;
        debug!(
            "event=filter_toggle module=store status=ok show_finished={}",
            self.show_finished
        );
        let show_finished = self.show_finished;
        self.notify(&StoreEvent::ShowFinishedToggled { show_finished });
        show_finished
    }

    fn position(&self, id: &TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| &todo.id == id)
    }

    /// Removes by id and persists; restores the record if the write fails.
    fn remove_persisted(&mut self, id: &TodoId) -> StoreResult<Option<Todo>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.todos.remove(index);
        if let Err(err) = self.persistence.save(&self.todos) {
            self.todos.insert(index, removed);
            return Err(err.into());
        }
        Ok(Some(removed))
    }

    fn notify(&mut self, event: &StoreEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}
