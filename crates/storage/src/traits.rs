use crate::error::StorageError;
use serde_json::Value;
use std::path::PathBuf;

/// Behavior flags for a store, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Pretty-print stored JSON documents.
    pub pretty: bool,
    /// Mirror every write into a second location.
    pub mirror: Option<PathBuf>,
}

/// A durable key-value JSON store with atomic replace semantics.
///
/// Keys are document names (`"genData"`, `"RYT"`, ...). Readers must never
/// observe a partial write.
pub trait CaseStore {
    /// Replace the document stored under `key`.
    fn put(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Read the document stored under `key`, if present.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_plain_unmirrored_writes() {
        let config = StoreConfig::default();
        assert!(!config.pretty);
        assert!(config.mirror.is_none());
    }
}
