use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde_json::Value;

use super::types::{Gateway, GatewayError};

/// Outbound HTTP gateway backed by reqwest
#[derive(Debug, Clone)]
pub struct HubClient {
    client: Client,
}

impl HubClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Gateway for HubClient {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Value, GatewayError> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to parse response: {}", e)))
    }
}
