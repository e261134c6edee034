//! Mapty Core - Workout domain models, input validation, and configuration
//!
//! This crate contains the workout record types and the port definitions the
//! store and the shell plug into.

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod ports;

pub use error::{MaptyError, Result};
