use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Audit fields listed by the history view
pub const HISTORY_FIELDS: &[&str] = &["id", "email", "workspace", "creationDate", "appVersion"];

/// User-editable fields, without build artifacts or audit stamps
pub const CUSTOMIZATION_FIELDS: &[&str] = &[
    "css",
    "javascript",
    "layout",
    "colors",
    "javascriptActive",
    "cssActive",
];

/// Everything but the build artifacts
pub const LATEST_FIELDS: &[&str] = &[
    "id",
    "email",
    "workspace",
    "creationDate",
    "appVersion",
    "layout",
    "javascript",
    "css",
    "colors",
    "javascriptActive",
    "cssActive",
];

pub const HISTORY_PAGE_SIZE: u32 = 30;

/// Input of a save: one new document per call
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveChangesParams {
    #[serde(default)]
    pub layout: Option<Map<String, Value>>,
    #[serde(default)]
    pub colors: Option<Map<String, Value>>,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub javascript: Option<String>,
    #[serde(default)]
    pub css_active: bool,
    #[serde(default)]
    pub javascript_active: bool,

    #[validate(length(min = 1, max = 254))]
    pub email: String,
    pub workspace: String,
}

impl SaveChangesParams {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        validate_workspace(&self.workspace)
    }

    /// Layout and colors flattened into one map, colors winning on conflicts
    pub fn template_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        for source in [&self.layout, &self.colors].into_iter().flatten() {
            for (key, value) in source {
                values.insert(key.clone(), value.clone());
            }
        }
        values
    }
}

pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Workspace names end up in a store filter, so keep them to a safe alphabet
pub fn validate_workspace(workspace: &str) -> AppResult<()> {
    validate_identifier("workspace name", workspace)
}

/// Document ids become a store URL path segment
pub fn validate_document_id(id: &str) -> AppResult<()> {
    validate_identifier("document id", id)
}

fn validate_identifier(kind: &str, value: &str) -> AppResult<()> {
    let valid = !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid {}: {:?}", kind, value)))
    }
}

/// A persisted customization as written to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    pub email: String,
    pub workspace: String,
    pub creation_date: String,
    pub app_version: String,
    pub layout: Option<Map<String, Value>>,
    pub colors: Option<Map<String, Value>>,
    pub javascript: Option<String>,
    pub css: Option<String>,
    pub javascript_active: bool,
    pub css_active: bool,
    pub javascript_build: Option<String>,
    pub css_build: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
}

/// The editable part of a document; build and audit fields have no slot here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationView {
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub javascript: Option<String>,
    #[serde(default)]
    pub layout: Option<Map<String, Value>>,
    #[serde(default)]
    pub colors: Option<Map<String, Value>>,
    #[serde(default)]
    pub javascript_active: Option<bool>,
    #[serde(default)]
    pub css_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestCustomization {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(flatten)]
    pub customization: CustomizationView,
}

#[derive(Debug, Deserialize)]
pub struct DocumentRef {
    pub id: String,
}
