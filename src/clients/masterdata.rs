use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::types::{DocumentStore, SearchQuery, StoreError};

/// Header carrying the caller or application token (`VtexIdclientAutCookie`)
pub const AUTH_COOKIE_HEADER: &str = "vtexidclientautcookie";

/// HTTP client for the Master Data document store
#[derive(Debug, Clone)]
pub struct MasterDataClient {
    client: Client,
    base_url: String,
    app_token: Option<String>,
}

impl MasterDataClient {
    pub fn new(client: Client, base_url: String, app_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token,
        }
    }

    fn entity_url(&self, entity: &str) -> String {
        format!(
            "{}/dataentities/{}",
            self.base_url,
            urlencoding::encode(entity)
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        match &self.app_token {
            Some(token) => builder.header(AUTH_COOKIE_HEADER, token),
            None => builder,
        }
    }
}

pub(crate) async fn remote_error(response: Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    StoreError::Remote { status, message }
}

pub(crate) fn network_error(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

pub(crate) fn decode_error(err: reqwest::Error) -> StoreError {
    StoreError::Decode(err.to_string())
}

#[async_trait]
impl DocumentStore for MasterDataClient {
    async fn create_document(
        &self,
        entity: &str,
        fields: Value,
        schema: &str,
    ) -> Result<Value, StoreError> {
        let url = format!("{}/documents", self.entity_url(entity));
        debug!("Creating document in {} with schema {}", entity, schema);

        let response = self
            .request(self.client.post(&url))
            .query(&[("_schema", schema)])
            .json(&fields)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        response.json::<Value>().await.map_err(decode_error)
    }

    async fn search_documents(&self, query: SearchQuery<'_>) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/search", self.entity_url(query.entity));
        let (from, to) = query.range();

        let mut params = vec![
            ("_schema", query.schema.to_string()),
            ("_fields", query.fields.join(",")),
            ("_sort", query.sort.to_string()),
        ];
        if let Some(filter) = &query.filter {
            params.push(("_where", filter.clone()));
        }

        let response = self
            .request(self.client.get(&url))
            .query(&params)
            .header("REST-Range", format!("resources={}-{}", from, to))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        response.json::<Vec<Value>>().await.map_err(decode_error)
    }

    async fn get_document(
        &self,
        entity: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<Option<Value>, StoreError> {
        // One path segment, whatever the id contains
        let url = format!(
            "{}/documents/{}",
            self.entity_url(entity),
            urlencoding::encode(id)
        );

        let response = self
            .request(self.client.get(&url))
            .query(&[("_fields", fields.join(","))])
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let document = response.json::<Value>().await.map_err(decode_error)?;
        Ok((!document.is_null()).then_some(document))
    }

    async fn create_or_update_schema(
        &self,
        entity: &str,
        schema_name: &str,
        body: &Value,
    ) -> Result<(), StoreError> {
        let url = format!(
            "{}/schemas/{}",
            self.entity_url(entity),
            urlencoding::encode(schema_name)
        );

        let response = self
            .request(self.client.put(&url))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        match response.status() {
            StatusCode::NOT_MODIFIED => Err(StoreError::NotModified),
            status if status.is_success() => Ok(()),
            _ => Err(remote_error(response).await),
        }
    }
}
