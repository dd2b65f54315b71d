use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings stored once per application installation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_setup: Option<AdminSetup>,

    /// Settings owned by other parts of the app, kept as-is
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSetup {
    #[serde(default)]
    pub has_schema: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Always the running version in responses, never read back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl AdminSetup {
    pub fn is_current(&self, expected_version: &str) -> bool {
        self.has_schema && self.schema_version.as_deref() == Some(expected_version)
    }

    pub fn mark_current(&mut self, version: &str) {
        self.has_schema = true;
        self.schema_version = Some(version.to_string());
    }

    /// Leaves `schema_version` untouched so the last confirmed version stays visible
    pub fn mark_stale(&mut self) {
        self.has_schema = false;
    }
}
