//! HTTP Console Client
//!
//! Implements ConfigService and ClusterService against the console backend's
//! REST API. Every endpoint answers with the `{status, data, errMsg}` envelope.

use crate::domain::entities::{ApiEnvelope, ClusterList, ClusterQuery, HomePage, ProxyConfig};
use crate::domain::errors::ServiceError;
use crate::domain::ports::{ClusterService, ConfigService};
use crate::domain::value_objects::ProxyAddress;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const HOME_PAGE_PATH: &str = "/proxy/homePage.query";
const PROXY_DETAIL_PATH: &str = "/proxy/proxyDetailConfig.query";
const UPDATE_PROXY_PATH: &str = "/proxy/updateProxyAddr.do";
const ADD_PROXY_PATH: &str = "/proxy/addProxyAddr.do";
const CLUSTER_LIST_PATH: &str = "/cluster/list.query";

/// Configuration for the backend connection.
#[derive(Debug, Clone)]
pub struct HttpConsoleConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8082")
    pub api_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HttpConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8082".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// reqwest-backed client for the console backend.
pub struct HttpConsoleClient {
    config: HttpConsoleConfig,
    client: reqwest::Client,
}

impl HttpConsoleClient {
    /// Create a client with the configured timeout.
    pub fn new(config: HttpConsoleConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Check the HTTP status, then unwrap the envelope.
    async fn decode<T>(response: reqwest::Response) -> Result<T, ServiceError>
    where
        T: DeserializeOwned + Default,
    {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Transport(format!(
                "backend request failed: {} - {}",
                status, body
            )));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_result()
    }
}

#[async_trait]
impl ConfigService for HttpConsoleClient {
    async fn get_home_page(&self) -> Result<HomePage, ServiceError> {
        let response = self.client.get(self.url(HOME_PAGE_PATH)).send().await?;
        Self::decode(response).await
    }

    async fn get_proxy_detail_config(
        &self,
        address: &ProxyAddress,
    ) -> Result<ProxyConfig, ServiceError> {
        let response = self
            .client
            .get(self.url(PROXY_DETAIL_PATH))
            .query(&[("proxyAddress", address.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn set_active_proxy_addr(&self, address: &ProxyAddress) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.url(UPDATE_PROXY_PATH))
            .json(&json!({ "proxyAddr": address }))
            .send()
            .await?;
        Self::decode::<Value>(response).await.map(|_| ())
    }

    async fn add_proxy_addr(&self, address: &ProxyAddress) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.url(ADD_PROXY_PATH))
            .json(&json!({ "newProxyAddr": address }))
            .send()
            .await?;
        Self::decode::<Value>(response).await.map(|_| ())
    }
}

#[async_trait]
impl ClusterService for HttpConsoleClient {
    async fn get_cluster_list(&self, query: &ClusterQuery) -> Result<ClusterList, ServiceError> {
        let response = self
            .client
            .get(self.url(CLUSTER_LIST_PATH))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpConsoleClient {
        HttpConsoleClient::new(HttpConsoleConfig {
            api_url: server.uri(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    fn addr(raw: &str) -> ProxyAddress {
        ProxyAddress::parse(raw).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = HttpConsoleConfig::default();
        assert_eq!(config.api_url, "http://127.0.0.1:8082");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = HttpConsoleClient::new(HttpConsoleConfig {
            api_url: "http://console:8082/".to_string(),
            request_timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(
            client.url(HOME_PAGE_PATH),
            "http://console:8082/proxy/homePage.query"
        );
    }

    // ===== ConfigService Tests =====

    #[tokio::test]
    async fn test_get_home_page_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/homePage.query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "data": {
                    "proxyAddrList": ["127.0.0.1:8081", "10.0.0.2:8081"],
                    "currentProxyAddr": "127.0.0.1:8081"
                },
                "errMsg": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client_for(&mock_server).get_home_page().await.unwrap();

        assert_eq!(page.proxy_addr_list, vec!["127.0.0.1:8081", "10.0.0.2:8081"]);
        assert_eq!(page.current_proxy_addr.as_deref(), Some("127.0.0.1:8081"));
    }

    #[tokio::test]
    async fn test_get_home_page_remote_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/homePage.query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": -1,
                "data": null,
                "errMsg": "proxy list is not configured"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_home_page().await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::Remote {
                status: -1,
                message: "proxy list is not configured".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_get_proxy_detail_config_sends_address() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/proxyDetailConfig.query"))
            .and(query_param("proxyAddress", "10.0.0.2:8081"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "data": {"grpcServerPort": 8081, "remotingListenPort": 8080}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = client_for(&mock_server)
            .get_proxy_detail_config(&addr("10.0.0.2:8081"))
            .await
            .unwrap();

        assert_eq!(config.get("grpcServerPort"), Some(&json!(8081)));
        assert_eq!(config.get("remotingListenPort"), Some(&json!(8080)));
    }

    #[tokio::test]
    async fn test_get_proxy_detail_config_keeps_field_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/proxyDetailConfig.query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"status":0,"data":{"zeta":1,"alpha":2,"mid":3}}"#),
            )
            .mount(&mock_server)
            .await;

        let config = client_for(&mock_server)
            .get_proxy_detail_config(&addr("a"))
            .await
            .unwrap();

        let keys: Vec<_> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_set_active_proxy_addr_posts_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/proxy/updateProxyAddr.do"))
            .and(body_json(json!({"proxyAddr": "10.0.0.2:8081"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .set_active_proxy_addr(&addr("10.0.0.2:8081"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_proxy_addr_remote_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/proxy/addProxyAddr.do"))
            .and(body_json(json!({"newProxyAddr": "10.0.0.3:8081"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 1,
                "errMsg": "no permission"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .add_proxy_addr(&addr("10.0.0.3:8081"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no permission");
    }

    #[tokio::test]
    async fn test_http_error_is_transport_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/homePage.query"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_home_page().await.unwrap_err();

        match err {
            ServiceError::Transport(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_transport_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/homePage.query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_home_page().await.unwrap_err();

        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let client = HttpConsoleClient::new(HttpConsoleConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
        })
        .unwrap();

        let err = client.get_home_page().await.unwrap_err();

        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/homePage.query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": 0}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpConsoleClient::new(HttpConsoleConfig {
            api_url: mock_server.uri(),
            request_timeout_secs: 1,
        })
        .unwrap();

        let err = client.get_home_page().await.unwrap_err();

        assert!(matches!(err, ServiceError::Transport(_)));
    }

    // ===== ClusterService Tests =====

    #[tokio::test]
    async fn test_get_cluster_list_with_cluster_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cluster/list.query"))
            .and(query_param("clusterName", "DefaultCluster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "data": {
                    "brokerServer": {"broker-a": {"0": {"addr": "10.0.0.1:10911"}}},
                    "clusterInfo": {"clusterAddrTable": {"DefaultCluster": ["broker-a"]}}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .get_cluster_list(&ClusterQuery {
                cluster_name: Some("DefaultCluster".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(
            list.broker_server,
            json!({"broker-a": {"0": {"addr": "10.0.0.1:10911"}}})
        );
    }

    #[tokio::test]
    async fn test_get_cluster_list_without_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cluster/list.query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 0, "data": null})))
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .get_cluster_list(&ClusterQuery::default())
            .await
            .unwrap();

        assert_eq!(list.broker_server, Value::Null);
    }
}
