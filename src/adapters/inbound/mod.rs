mod api_server;

pub use api_server::{AddProxyRequest, ApiServer, ApiState, HealthResponse, SelectProxyRequest};
