//! Domain Entities - Core business objects
//!
//! These entities represent the proxy registry and broker topology as the
//! console sees them. Payloads coming from the backend keep their field
//! order so tables render in server order.

use crate::domain::errors::ServiceError;
use crate::domain::value_objects::ProxyAddress;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque configuration mapping of a proxy, as returned by the backend.
pub type ProxyConfig = Map<String, Value>;

/// Response envelope shared by every backend endpoint.
///
/// `status == 0` means success; any other value is a failure described
/// by `errMsg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: i64,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, rename = "errMsg")]
    pub err_msg: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub const SUCCESS: i64 = 0;
    pub const FAILURE: i64 = -1;

    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: Self::SUCCESS,
            data: Some(data),
            err_msg: None,
        }
    }

    /// Failed envelope carrying a human readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Self::FAILURE,
            data: None,
            err_msg: Some(message.into()),
        }
    }
}

impl<T: Default> ApiEnvelope<T> {
    /// Split the envelope into payload or remote error.
    ///
    /// A successful envelope without `data` yields the payload's default.
    pub fn into_result(self) -> Result<T, ServiceError> {
        if self.status == Self::SUCCESS {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(ServiceError::Remote {
                status: self.status,
                message: self.err_msg.unwrap_or_default(),
            })
        }
    }
}

/// Home page payload: known proxies and the one the backend considers active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub proxy_addr_list: Vec<String>,
    #[serde(default)]
    pub current_proxy_addr: Option<String>,
}

/// Point-in-time view of the proxy registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRegistryState {
    /// Known proxies, unique, in display order
    pub known_addresses: Vec<ProxyAddress>,
    /// Active proxy, absent until the first successful home page fetch
    pub active_address: Option<ProxyAddress>,
    /// Configuration of the last successfully fetched proxy
    pub active_config: Option<ProxyConfig>,
    /// Whether this session may mutate the registry
    pub can_write: bool,
}

impl ProxyRegistryState {
    pub fn contains(&self, address: &ProxyAddress) -> bool {
        self.known_addresses.iter().any(|a| a == address)
    }
}

/// Parameters of the cluster list query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
}

/// Cluster list payload. Only `brokerServer` is interpreted by the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterList {
    #[serde(default)]
    pub broker_server: Value,
    #[serde(default)]
    pub cluster_info: Value,
}

/// One broker instance inside a [`BrokerGroup`].
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerInstance {
    pub broker_index: String,
    pub detail: Map<String, Value>,
}

/// All instances sharing a broker name.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerGroup {
    pub broker_name: String,
    pub instances: Vec<BrokerInstance>,
}

/// Nested topology: brokerName -> brokerIndex -> instance detail.
///
/// Built leniently from loosely typed JSON. Anything that is not an
/// object at the expected level contributes no instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrokerTopology {
    pub groups: Vec<BrokerGroup>,
}

impl BrokerTopology {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(by_name)) = value else {
            return Self::default();
        };

        let groups = by_name
            .iter()
            .filter_map(|(broker_name, by_index)| {
                let by_index = by_index.as_object()?;
                let instances = by_index
                    .iter()
                    .filter_map(|(broker_index, detail)| {
                        Some(BrokerInstance {
                            broker_index: broker_index.clone(),
                            detail: detail.as_object()?.clone(),
                        })
                    })
                    .collect();
                Some(BrokerGroup {
                    broker_name: broker_name.clone(),
                    instances,
                })
            })
            .collect();

        Self { groups }
    }

    /// Number of (brokerName, brokerIndex) leaves.
    pub fn instance_count(&self) -> usize {
        self.groups.iter().map(|g| g.instances.len()).sum()
    }
}

/// Flat, display-ready record for one broker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerInstanceRecord {
    /// `brokerName_brokerIndex`, stable row key
    pub composite_id: String,
    pub broker_name: String,
    pub broker_index: String,
    /// Every other server-supplied field, verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
