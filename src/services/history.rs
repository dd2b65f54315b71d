use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::clients::{DocumentStore, SearchQuery, Sort, StoreError};
use crate::error::{AppError, AppResult};
use crate::models::customization::{
    validate_document_id, validate_workspace, CUSTOMIZATION_FIELDS, HISTORY_FIELDS,
    HISTORY_PAGE_SIZE, LATEST_FIELDS,
};
use crate::models::{
    CustomizationView, DocumentRef, HistoryEntry, LatestCustomization, SchemaDefinition,
};

/// Newest first. Equal stamps keep whatever order the store returns.
const BY_NEWEST: Sort = Sort::desc("creationDate");

/// Read side over the append-only customization history
pub struct HistoryService {
    store: Arc<dyn DocumentStore>,
    schema: SchemaDefinition,
}

fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::Store(StoreError::Decode(e.to_string())))
}

impl HistoryService {
    pub fn new(store: Arc<dyn DocumentStore>, schema: SchemaDefinition) -> Self {
        Self { store, schema }
    }

    /// First page only; older entries are never listed
    pub async fn get_history(&self) -> AppResult<Vec<HistoryEntry>> {
        let documents = self
            .store
            .search_documents(SearchQuery {
                entity: self.schema.entity,
                schema: self.schema.version,
                fields: HISTORY_FIELDS,
                filter: None,
                sort: BY_NEWEST,
                page: 1,
                page_size: HISTORY_PAGE_SIZE,
            })
            .await?;

        documents.into_iter().map(decode::<HistoryEntry>).collect()
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<CustomizationView> {
        validate_document_id(id)?;

        let document = self
            .store
            .get_document(self.schema.entity, id, CUSTOMIZATION_FIELDS)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customization {} not found", id)))?;

        decode(document)
    }

    /// Most recent document saved for `workspace`, `None` if it has none
    pub async fn get_last(&self, workspace: &str) -> AppResult<Option<LatestCustomization>> {
        validate_workspace(workspace)?;

        let newest = self
            .store
            .search_documents(SearchQuery {
                entity: self.schema.entity,
                schema: self.schema.version,
                fields: &["id"],
                filter: Some(format!("workspace={}", workspace)),
                sort: BY_NEWEST,
                page: 1,
                page_size: 1,
            })
            .await?;

        let Some(first) = newest.into_iter().next() else {
            debug!("No customization saved for workspace {}", workspace);
            return Ok(None);
        };
        let DocumentRef { id } = decode::<DocumentRef>(first)?;
        validate_document_id(&id)?;

        match self
            .store
            .get_document(self.schema.entity, &id, LATEST_FIELDS)
            .await?
        {
            Some(document) => decode::<LatestCustomization>(document).map(Some),
            None => Ok(None),
        }
    }
}
