//! Key-Value Store Port
//!
//! Defines the interface for small values that must survive a restart
//! of the console session (the active proxy address).

use async_trait::async_trait;

/// Persistent string key-value storage.
///
/// Writes are best effort: implementations log storage failures instead of
/// returning them, so a broken store never blocks a registry mutation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str);
}
