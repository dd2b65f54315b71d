use async_trait::async_trait;
use reqwest::{header, Client};

use super::masterdata::{decode_error, network_error, remote_error, AUTH_COOKIE_HEADER};
use super::types::{SettingsStore, StoreError};
use crate::models::AppSettings;

/// HTTP client for the per-application settings store
#[derive(Debug, Clone)]
pub struct AppsClient {
    client: Client,
    base_url: String,
    app_token: Option<String>,
}

impl AppsClient {
    pub fn new(client: Client, base_url: String, app_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token,
        }
    }

    fn settings_url(&self, app_id: &str) -> String {
        format!("{}/apps/{}/settings", self.base_url, app_id)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(header::ACCEPT, "application/json");
        match &self.app_token {
            Some(token) => builder.header(AUTH_COOKIE_HEADER, token),
            None => builder,
        }
    }
}

#[async_trait]
impl SettingsStore for AppsClient {
    async fn get_settings(&self, app_id: &str) -> Result<AppSettings, StoreError> {
        let response = self
            .request(self.client.get(self.settings_url(app_id)))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        // A never-configured app answers with an empty body
        let body = response.text().await.map_err(decode_error)?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(AppSettings::default());
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn save_settings(&self, app_id: &str, settings: &AppSettings) -> Result<(), StoreError> {
        let response = self
            .request(self.client.put(self.settings_url(app_id)))
            .json(settings)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        Ok(())
    }
}
