//! broker-console - Proxy registry and topology API for the broker console
//!
//! This is the composition root that wires together all the components.

use broker_console::adapters::inbound::{ApiServer, ApiState};
use broker_console::adapters::outbound::{
    DashMapKeyValueStore, HttpConsoleClient, HttpConsoleConfig, SqliteKeyValueStore,
};
use broker_console::domain::ports::KeyValueStore;
use broker_console::{load_config, ProxyRegistry, TopologyService};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting broker-console backend={} listen={} role={}",
        cfg.api_url,
        cfg.listen_addr,
        cfg.role
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters
    let client = Arc::new(HttpConsoleClient::new(HttpConsoleConfig {
        api_url: cfg.api_url.clone(),
        request_timeout_secs: cfg.request_timeout_secs,
    })?);

    let kv_store: Arc<dyn KeyValueStore> = match &cfg.kv_path {
        Some(path) => Arc::new(SqliteKeyValueStore::open(path.clone())?),
        None => {
            tracing::info!("no key-value path set, active proxy kept in memory only");
            Arc::new(DashMapKeyValueStore::new())
        }
    };

    // 2. Application services
    let registry = Arc::new(ProxyRegistry::new(client.clone(), kv_store, cfg.role));
    let topology = Arc::new(TopologyService::new(client));

    if let Some(previous) = registry.persisted_address().await {
        tracing::info!("last active proxy from previous session: {}", previous);
    }

    // A failed first load is reported; the UI can retry through the API
    if let Err(e) = registry.initialize().await {
        tracing::error!("initial proxy registry load failed: {}", e);
    }

    // 3. Inbound adapter
    let server = ApiServer::new(cfg.listen_addr.clone(), ApiState::new(registry, topology));

    server.run().await
}
