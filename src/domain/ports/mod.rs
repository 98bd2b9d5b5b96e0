mod cluster_service;
mod config_service;
mod key_value_store;

pub use cluster_service::ClusterService;
pub use config_service::ConfigService;
pub use key_value_store::KeyValueStore;
