//! In-memory collaborators for tests.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use super::types::{DocumentStore, Gateway, GatewayError, SearchQuery, SettingsStore, StoreError};
use crate::models::AppSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSearch {
    pub fields: Vec<String>,
    pub filter: Option<String>,
    pub sort: String,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    schema: String,
    fields: Value,
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<Vec<StoredDocument>>,
    schemas: Mutex<HashMap<String, Value>>,
    schema_failure: Mutex<Option<StoreError>>,
    fail_writes: AtomicBool,
    schema_calls: AtomicUsize,
    next_id: AtomicUsize,
    searches: Mutex<Vec<RecordedSearch>>,
    fetches: Mutex<Vec<Vec<String>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document as if written under `schema`; returns its id
    pub fn insert(&self, schema: &str, mut fields: Value) -> String {
        let id = format!("doc-{}", self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1);
        if let Some(obj) = fields.as_object_mut() {
            obj.insert("id".to_string(), json!(id));
        }
        self.documents.lock().unwrap().push(StoredDocument {
            schema: schema.to_string(),
            fields,
        });
        id
    }

    pub fn all(&self) -> Vec<Value> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.fields.clone())
            .collect()
    }

    pub fn schema_of(&self, id: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.fields["id"] == id)
            .map(|d| d.schema.clone())
    }

    pub fn fail_schema_with(&self, err: StoreError) {
        *self.schema_failure.lock().unwrap() = Some(err);
    }

    pub fn clear_schema_failure(&self) {
        *self.schema_failure.lock().unwrap() = None;
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, AtomicOrdering::SeqCst);
    }

    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn declared_schema(&self, name: &str) -> Option<Value> {
        self.schemas.lock().unwrap().get(name).cloned()
    }

    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<Vec<String>> {
        self.fetches.lock().unwrap().clone()
    }
}

fn project(document: &Value, fields: &[&str]) -> Value {
    let mut out = Map::new();
    for field in fields {
        if let Some(value) = document.get(*field) {
            out.insert(field.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

fn matches_filter(document: &Value, filter: &Option<String>) -> bool {
    match filter.as_deref().and_then(|f| f.split_once('=')) {
        Some((field, expected)) => document.get(field).and_then(|v| v.as_str()) == Some(expected),
        None => true,
    }
}

// Stamps are decimal millisecond strings; compare numerically
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    let key = |doc: &Value| {
        doc.get(field)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(i64::MIN)
    };
    key(a).cmp(&key(b))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_document(
        &self,
        _entity: &str,
        fields: Value,
        schema: &str,
    ) -> Result<Value, StoreError> {
        if self.fail_writes.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Remote {
                status: 500,
                message: "write rejected".to_string(),
            });
        }
        let id = self.insert(schema, fields);
        Ok(json!({ "Id": id, "DocumentId": id, "Href": format!("/documents/{}", id) }))
    }

    async fn search_documents(&self, query: SearchQuery<'_>) -> Result<Vec<Value>, StoreError> {
        self.searches.lock().unwrap().push(RecordedSearch {
            fields: query.fields.iter().map(|f| f.to_string()).collect(),
            filter: query.filter.clone(),
            sort: query.sort.to_string(),
            page: query.page,
            page_size: query.page_size,
        });

        let mut matching: Vec<Value> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.schema == query.schema && matches_filter(&d.fields, &query.filter))
            .map(|d| d.fields.clone())
            .collect();

        matching.sort_by(|a, b| compare_field(b, a, query.sort.field));

        let (from, _) = query.range();
        Ok(matching
            .iter()
            .skip(from as usize)
            .take(query.page_size as usize)
            .map(|d| project(d, query.fields))
            .collect())
    }

    async fn get_document(
        &self,
        _entity: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<Option<Value>, StoreError> {
        self.fetches
            .lock()
            .unwrap()
            .push(fields.iter().map(|f| f.to_string()).collect());

        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.fields["id"] == id)
            .map(|d| project(&d.fields, fields)))
    }

    async fn create_or_update_schema(
        &self,
        _entity: &str,
        schema_name: &str,
        body: &Value,
    ) -> Result<(), StoreError> {
        self.schema_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(err) = self.schema_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.schemas
            .lock()
            .unwrap()
            .insert(schema_name.to_string(), body.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    settings: Mutex<HashMap<String, AppSettings>>,
    saves: AtomicUsize,
    fail_reads: AtomicBool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(app_id: &str, settings: AppSettings) -> Self {
        let store = Self::default();
        store
            .settings
            .lock()
            .unwrap()
            .insert(app_id.to_string(), settings);
        store
    }

    pub fn stored(&self, app_id: &str) -> Option<AppSettings> {
        self.settings.lock().unwrap().get(app_id).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(AtomicOrdering::SeqCst)
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_settings(&self, app_id: &str) -> Result<AppSettings, StoreError> {
        if self.fail_reads.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Network("settings unavailable".to_string()));
        }
        Ok(self.stored(app_id).unwrap_or_default())
    }

    async fn save_settings(&self, app_id: &str, settings: &AppSettings) -> Result<(), StoreError> {
        self.saves.fetch_add(1, AtomicOrdering::SeqCst);
        self.settings
            .lock()
            .unwrap()
            .insert(app_id.to_string(), settings.clone());
        Ok(())
    }
}

pub struct MemoryGateway {
    response: Mutex<Result<Value, GatewayError>>,
    requests: Mutex<Vec<(String, HeaderMap)>>,
}

impl MemoryGateway {
    pub fn responding(value: Value) -> Self {
        Self {
            response: Mutex::new(Ok(value)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: GatewayError) -> Self {
        Self {
            response: Mutex::new(Err(err)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, HeaderMap)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Value, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers));
        self.response.lock().unwrap().clone()
    }
}
