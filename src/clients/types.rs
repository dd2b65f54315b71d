use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::fmt;

use crate::models::AppSettings;

/// Errors raised by the document store and the settings store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store already holds this exact resource (HTTP 304)
    #[error("Resource not modified")]
    NotModified,

    #[error("Store returned status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Invalid store response: {0}")]
    Decode(String),
}

/// Errors raised by the outbound gateway
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Network(String),

    #[error("Request failed with status code {status}")]
    Remote { status: u16, body: Option<Value> },
}

impl GatewayError {
    /// Normalized message: the error's own description, then the upstream body's `message`
    pub fn message(&self) -> String {
        let own = self.to_string();
        if own.is_empty() {
            self.upstream_message().unwrap_or_default().to_string()
        } else {
            own
        }
    }

    /// `message` field of the upstream error body, if it sent one
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            GatewayError::Remote {
                body: Some(body), ..
            } => body
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

/// Descending order on one field; every query here lists newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
}

impl Sort {
    pub const fn desc(field: &'static str) -> Self {
        Self { field }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DESC", self.field)
    }
}

/// A search over one data entity, 1-based pages
#[derive(Debug, Clone)]
pub struct SearchQuery<'a> {
    pub entity: &'a str,
    pub schema: &'a str,
    pub fields: &'a [&'a str],
    pub filter: Option<String>,
    pub sort: Sort,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery<'_> {
    /// Inclusive zero-based range of the requested page
    pub fn range(&self) -> (u32, u32) {
        let from = self.page.saturating_sub(1) * self.page_size;
        (from, from + self.page_size.saturating_sub(1))
    }
}

/// Versioned document persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a new document tagged with `schema`, returning the store's ack
    async fn create_document(
        &self,
        entity: &str,
        fields: Value,
        schema: &str,
    ) -> Result<Value, StoreError>;

    async fn search_documents(&self, query: SearchQuery<'_>) -> Result<Vec<Value>, StoreError>;

    /// Fetch one document projected to `fields`; `None` when the id is unknown
    async fn get_document(
        &self,
        entity: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<Option<Value>, StoreError>;

    /// Declare a schema; fails with `StoreError::NotModified` if it is already current
    async fn create_or_update_schema(
        &self,
        entity: &str,
        schema_name: &str,
        body: &Value,
    ) -> Result<(), StoreError>;
}

/// Per-application settings persistence
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_settings(&self, app_id: &str) -> Result<AppSettings, StoreError>;

    async fn save_settings(&self, app_id: &str, settings: &AppSettings) -> Result<(), StoreError>;
}

/// Outbound HTTP gateway
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Value, GatewayError>;
}
