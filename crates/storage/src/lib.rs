//! Storage abstraction and implementations for Stride.
//!
//! This crate provides a trait-based storage interface with a per-user
//! JSON-file reference implementation and an in-memory backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory_storage;
pub mod paths;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory_storage::MemoryStorage;
