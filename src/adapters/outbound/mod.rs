mod dashmap_kv_store;
mod http_console_client;
mod sqlite_kv_store;

pub use dashmap_kv_store::DashMapKeyValueStore;
pub use http_console_client::{HttpConsoleClient, HttpConsoleConfig};
pub use sqlite_kv_store::SqliteKeyValueStore;
