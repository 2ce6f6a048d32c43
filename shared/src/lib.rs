//! Shared types for the Fournil suite
//!
//! Common types used across multiple crates: the table enumeration,
//! record models, and print layout primitives.

pub mod layout;
pub mod models;
pub mod tables;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use tables::Table;
