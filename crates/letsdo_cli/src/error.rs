//! CLI error type and exit code mapping.

use letsdo_core::db::DbError;
use letsdo_core::{LoggingError, RepoError, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Exit code for storage, logging and I/O failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for rejected input or ids that match nothing.
pub const EXIT_REJECTED: i32 = 2;

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Logging(LoggingError),
    Db(DbError),
    Store(StoreError),
    UnknownId(String),
    AmbiguousId { needle: String, matches: usize },
    Io(std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Store(StoreError::Rejected(_))
            | Self::UnknownId(_)
            | Self::AmbiguousId { .. } => EXIT_REJECTED,
            _ => EXIT_FAILURE,
        }
    }

    /// Errors a shell session reports and survives.
    pub fn is_recoverable(&self) -> bool {
        self.exit_code() == EXIT_REJECTED
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "config error: {message}"),
            Self::Logging(err) => write!(f, "logging error: {err}"),
            Self::Db(err) => write!(f, "database error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::UnknownId(needle) => write!(f, "no todo matches id `{needle}`"),
            Self::AmbiguousId { needle, matches } => write!(
                f,
                "id prefix `{needle}` matches {matches} todos; use more characters"
            ),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Store(StoreError::Repo(value))
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
