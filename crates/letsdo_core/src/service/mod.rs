//! Core use-case services.
//!
//! # Responsibility
//! - Hold session state and orchestrate persistence for each user intent.
//! - Keep front-ends decoupled from storage details.

pub mod todo_store;
