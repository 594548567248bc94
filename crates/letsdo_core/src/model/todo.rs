//! Todo domain model.
//!
//! # Responsibility
//! - Define the single task record persisted by LetsDo.
//! - Own the creation rule for task text and the load-time shape checks.
//!
//! # Invariants
//! - `id` is opaque and never changes after creation; new ids are v4 UUIDs
//!   but loaded ids are kept byte-for-byte.
//! - `created_at` is set once at creation and never rewritten.
//! - New records need more than `MIN_TEXT_CHARS` characters of trimmed text.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of a todo record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Mints a fresh id for a newly created record.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Trimmed text must be strictly longer than this to be accepted.
pub const MIN_TEXT_CHARS: usize = 3;

const CREATED_AT_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Validation failures for todo records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Id is empty or whitespace only.
    EmptyId,
    /// Text at creation time is too short once trimmed.
    TextTooShort { min_exclusive: usize, actual: usize },
    /// Persisted text is empty or whitespace only.
    BlankText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "todo id must not be empty"),
            Self::TextTooShort {
                min_exclusive,
                actual,
            } => write!(
                f,
                "todo text must be longer than {min_exclusive} characters, got {actual}"
            ),
            Self::BlankText => write!(f, "todo text must not be blank"),
        }
    }
}

impl Error for TodoValidationError {}

/// One to-do entry.
///
/// Serialized with the browser-era field names (`todo`, `isCompleted`,
/// `createdAt`) so existing blobs stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTodo")]
pub struct Todo {
    pub id: TodoId,
    #[serde(rename = "todo")]
    pub text: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Unchecked wire shape; converted through `Todo::validate`.
#[derive(Deserialize)]
struct RawTodo {
    id: TodoId,
    todo: String,
    #[serde(rename = "isCompleted")]
    is_completed: bool,
    #[serde(rename = "createdAt")]
    created_at: String,
}

impl TryFrom<RawTodo> for Todo {
    type Error = TodoValidationError;

    fn try_from(raw: RawTodo) -> Result<Self, Self::Error> {
        let todo = Self {
            id: raw.id,
            text: raw.todo,
            is_completed: raw.is_completed,
            created_at: raw.created_at,
        };
        todo.validate()?;
        Ok(todo)
    }
}

impl Todo {
    /// Creates a new open todo stamped with the current local time.
    ///
    /// # Errors
    /// - `TextTooShort` when trimmed `text` has `MIN_TEXT_CHARS` chars or fewer.
    pub fn new(text: impl Into<String>) -> Result<Self, TodoValidationError> {
        Self::new_at(text, &Local::now())
    }

    /// Same as [`Todo::new`] with an explicit creation instant.
    pub fn new_at<Tz>(
        text: impl Into<String>,
        now: &DateTime<Tz>,
    ) -> Result<Self, TodoValidationError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let text = text.into();
        check_new_text(&text)?;
        Ok(Self {
            id: TodoId::generate(),
            text,
            is_completed: false,
            created_at: format_created_at(now),
        })
    }

    /// Rebuilds a record from already-known parts (imports, fixtures).
    ///
    /// Applies load-time checks only; the creation length rule is not
    /// re-applied to existing data.
    pub fn from_parts(
        id: impl Into<TodoId>,
        text: impl Into<String>,
        is_completed: bool,
        created_at: impl Into<String>,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id: id.into(),
            text: text.into(),
            is_completed,
            created_at: created_at.into(),
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks the invariants every stored record must hold.
    ///
    /// `created_at` is display-only and accepted as stored.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::BlankText);
        }
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }

    /// Whether this record is shown under the given finished-visibility flag.
    pub fn is_visible(&self, show_finished: bool) -> bool {
        show_finished || !self.is_completed
    }
}

/// Applies the creation rule to candidate text.
pub fn check_new_text(text: &str) -> Result<(), TodoValidationError> {
    let actual = text.trim().chars().count();
    if actual <= MIN_TEXT_CHARS {
        return Err(TodoValidationError::TextTooShort {
            min_exclusive: MIN_TEXT_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Formats a creation timestamp as `M/D/YYYY, h:mm:ss AM`.
pub fn format_created_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(CREATED_AT_FORMAT).to_string()
}
