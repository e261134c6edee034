//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod map;
pub mod storage;

pub use map::{LocationProvider, MapView};
pub use storage::KeyValueStore;
