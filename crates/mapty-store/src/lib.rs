//! Mapty Store - Workout store, persistence codec and storage adapters
//!
//! This crate holds the in-memory workout collection, the codec that writes it
//! to a flat key-value store and reads it back, and the key-value adapters.

pub mod codec;
pub mod file;
pub mod memory;
pub mod session;

pub use file::FileKeyValueStore;
pub use memory::{MemoryKeyValueStore, WorkoutStore};
pub use session::{RestoreReport, WorkoutSession};
