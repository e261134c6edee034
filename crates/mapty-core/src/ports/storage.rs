use crate::error::Result;

/// Port for a flat key-value text store
///
/// Values are opaque strings; any structure is the caller's concern.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
