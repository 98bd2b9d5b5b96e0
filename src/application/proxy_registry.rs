//! Proxy Registry - Active proxy selection use case
//!
//! Owns the set of known proxy addresses, the active selection and its
//! configuration. Every change is confirmed by the config service before it
//! is applied locally, and the active address is persisted so the selection
//! survives a restart of the console.

use crate::domain::entities::{HomePage, ProxyConfig, ProxyRegistryState};
use crate::domain::errors::RegistryError;
use crate::domain::ports::{ConfigService, KeyValueStore};
use crate::domain::value_objects::{OperatorRole, ProxyAddress};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage key holding the active proxy address.
pub const ACTIVE_PROXY_KEY: &str = "proxyaddr";

/// Proxy registry - single source of truth for the active proxy.
///
/// One instance per console session. Write capability is fixed at
/// construction from the operator role; it is a convenience gate only,
/// the backend still authorizes every write on its own.
pub struct ProxyRegistry {
    config_service: Arc<dyn ConfigService>,
    kv_store: Arc<dyn KeyValueStore>,
    role: OperatorRole,
    state: RwLock<ProxyRegistryState>,
    /// Generation of the most recently issued detail fetch
    config_generation: AtomicU64,
}

impl ProxyRegistry {
    /// Create an empty registry. Call [`initialize`](Self::initialize) to load it.
    pub fn new(
        config_service: Arc<dyn ConfigService>,
        kv_store: Arc<dyn KeyValueStore>,
        role: OperatorRole,
    ) -> Self {
        Self {
            config_service,
            kv_store,
            role,
            state: RwLock::new(ProxyRegistryState {
                can_write: role.can_write(),
                ..Default::default()
            }),
            config_generation: AtomicU64::new(0),
        }
    }

    /// Load the known proxies and the active one from the config service.
    ///
    /// On success the active address is persisted and its configuration
    /// fetched. On failure nothing is changed.
    ///
    /// When the config service reports no current proxy, a previously active
    /// address that is still listed stays active. Otherwise the selection and
    /// its configuration are cleared together.
    pub async fn initialize(&self) -> Result<(), RegistryError> {
        let page = self.config_service.get_home_page().await.map_err(|e| {
            tracing::warn!("home page fetch failed: {}", e);
            RegistryError::from(e)
        })?;

        let active = {
            let mut state = self.state.write().await;
            let (known, active) =
                Self::reconcile_home_page(page, state.active_address.as_ref());
            state.known_addresses = known;
            state.active_address = active.clone();
            match &active {
                Some(address) => self.persist_active(address).await,
                None => {
                    // Invalidate any in-flight fetch for the old selection
                    self.config_generation.fetch_add(1, Ordering::SeqCst);
                    state.active_config = None;
                }
            }
            active
        };

        match active {
            Some(address) => {
                tracing::info!("proxy registry initialized, active={}", address);
                self.refresh_active_config().await
            }
            None => {
                tracing::warn!("config service reported no active proxy");
                Ok(())
            }
        }
    }

    /// Fetch the configuration of the active proxy.
    ///
    /// A failure keeps the previous configuration. A response that arrives
    /// after a newer fetch was issued is dropped.
    pub async fn refresh_active_config(&self) -> Result<(), RegistryError> {
        let Some(address) = self.active_address().await else {
            tracing::debug!("no active proxy, skipping config refresh");
            return Ok(());
        };

        let generation = self.config_generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.config_service.get_proxy_detail_config(&address).await {
            Ok(config) => {
                let mut state = self.state.write().await;
                if self.config_generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!(
                        "discarding superseded config for {} (generation={})",
                        address,
                        generation
                    );
                    return Ok(());
                }
                state.active_config = Some(config);
                tracing::debug!("config refreshed for {}", address);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("config fetch for {} failed: {}", address, e);
                Err(e.into())
            }
        }
    }

    /// Make `address` the active proxy.
    ///
    /// Requires write access and a known address; both are checked before
    /// the config service is contacted.
    pub async fn select_address(&self, address: &str) -> Result<(), RegistryError> {
        self.ensure_writable("select_address")?;

        let address = ProxyAddress::parse(address)
            .ok_or_else(|| RegistryError::NotFound(address.to_string()))?;
        if !self.state.read().await.contains(&address) {
            return Err(RegistryError::NotFound(address.to_string()));
        }

        self.config_service
            .set_active_proxy_addr(&address)
            .await
            .map_err(|e| {
                tracing::warn!("selecting {} failed: {}", address, e);
                RegistryError::from(e)
            })?;

        {
            let mut state = self.state.write().await;
            state.active_address = Some(address.clone());
            // Persisted under the lock so overlapping selects cannot reorder
            self.persist_active(&address).await;
        }
        tracing::info!("active proxy changed to {}", address);

        self.refresh_active_config().await
    }

    /// Register a new proxy address. Does not change the active proxy.
    pub async fn add_address(&self, address: &str) -> Result<(), RegistryError> {
        self.ensure_writable("add_address")?;

        let address = ProxyAddress::parse(address).ok_or_else(|| {
            RegistryError::InvalidInput("proxy address must not be empty".to_string())
        })?;
        if self.state.read().await.contains(&address) {
            return Err(RegistryError::InvalidInput(format!(
                "proxy address already exists: {}",
                address
            )));
        }

        self.config_service
            .add_proxy_addr(&address)
            .await
            .map_err(|e| {
                tracing::warn!("adding {} failed: {}", address, e);
                RegistryError::from(e)
            })?;

        {
            let mut state = self.state.write().await;
            // A concurrent add may have landed while the request was in flight
            if !state.contains(&address) {
                state.known_addresses.push(address.clone());
            }
            if let Some(active) = &state.active_address {
                self.persist_active(active).await;
            }
        }
        tracing::info!("proxy address added: {}", address);

        Ok(())
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ProxyRegistryState {
        self.state.read().await.clone()
    }

    pub async fn known_addresses(&self) -> Vec<ProxyAddress> {
        self.state.read().await.known_addresses.clone()
    }

    pub async fn active_address(&self) -> Option<ProxyAddress> {
        self.state.read().await.active_address.clone()
    }

    pub async fn active_config(&self) -> Option<ProxyConfig> {
        self.state.read().await.active_config.clone()
    }

    /// Active address saved by a previous session, if any.
    pub async fn persisted_address(&self) -> Option<String> {
        self.kv_store.get(ACTIVE_PROXY_KEY).await
    }

    pub fn can_write(&self) -> bool {
        self.role.can_write()
    }

    pub fn role(&self) -> OperatorRole {
        self.role
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<(), RegistryError> {
        if self.can_write() {
            Ok(())
        } else {
            tracing::debug!("{} rejected for role {}", operation, self.role);
            Err(RegistryError::PermissionDenied { operation })
        }
    }

    async fn persist_active(&self, address: &ProxyAddress) {
        self.kv_store.set(ACTIVE_PROXY_KEY, address.as_str()).await;
    }

    /// Deduplicate the address list (first occurrence wins) and make sure
    /// the current address is part of it. Without a current address the
    /// `previous` selection is kept if the list still has it.
    fn reconcile_home_page(
        page: HomePage,
        previous: Option<&ProxyAddress>,
    ) -> (Vec<ProxyAddress>, Option<ProxyAddress>) {
        let mut seen = HashSet::new();
        let mut known: Vec<ProxyAddress> = page
            .proxy_addr_list
            .iter()
            .filter_map(|raw| ProxyAddress::parse(raw))
            .filter(|addr| seen.insert(addr.clone()))
            .collect();

        let active = match page.current_proxy_addr.as_deref().and_then(ProxyAddress::parse) {
            Some(current) => Some(current),
            None => previous.filter(|prev| known.contains(*prev)).cloned(),
        };

        if let Some(addr) = &active {
            if !known.contains(addr) {
                known.push(addr.clone());
            }
        }

        (known, active)
    }
}
