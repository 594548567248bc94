//! Domain model for LetsDo.
//!
//! # Responsibility
//! - Define the task record and its validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable `TodoId`.
//! - Deletion removes records outright; there are no tombstones.

pub mod todo;
