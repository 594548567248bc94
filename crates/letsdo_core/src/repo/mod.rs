//! Repository layer: key-value storage and todo list persistence.
//!
//! # Responsibility
//! - Define the durable key-value contract standing in for local storage.
//! - Isolate SQLite and JSON details from the store/business layer.
//!
//! # Invariants
//! - Persisted lists are validated on read; corrupt data surfaces as
//!   `RepoError::InvalidData`.

pub mod kv_store;
pub mod todo_repo;
