use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::clients::{Gateway, AUTH_COOKIE_HEADER};
use crate::error::{AppError, AppResult};

/// Lists the account's deployment workspaces through the gateway
pub struct WorkspaceService {
    gateway: Arc<dyn Gateway>,
    platform_url: String,
    account: String,
}

impl WorkspaceService {
    pub fn new(gateway: Arc<dyn Gateway>, platform_url: String, account: String) -> Self {
        Self {
            gateway,
            platform_url: platform_url.trim_end_matches('/').to_string(),
            account,
        }
    }

    pub fn workspaces_url(&self) -> String {
        format!("{}/{}/", self.platform_url, self.account)
    }

    pub async fn list_workspaces(&self, auth_token: &str) -> AppResult<Value> {
        let headers = default_headers(auth_token)?;

        self.gateway
            .get(&self.workspaces_url(), headers)
            .await
            .map_err(|e| {
                warn!(
                    "Workspace listing for {} failed: {} (upstream: {})",
                    self.account,
                    e,
                    e.upstream_message().unwrap_or("-")
                );
                AppError::Gateway(e.message())
            })
    }
}

/// JSON headers plus the caller's token as both cookie and proxy authorization
pub fn default_headers(auth_token: &str) -> AppResult<HeaderMap> {
    let token = HeaderValue::from_str(auth_token)
        .map_err(|_| AppError::Unauthorized("Malformed session token".to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(AUTH_COOKIE_HEADER, token.clone());
    headers.insert(header::PROXY_AUTHORIZATION, token);
    Ok(headers)
}
