use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Data entity holding every saved customization
pub const DATA_ENTITY: &str = "checkoutcustom";

/// Bump whenever a field below changes
pub const SCHEMA_VERSION: &str = "v0.1.3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
    Object,
}

impl FieldType {
    fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, title: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            title,
            field_type,
            nullable: false,
        }
    }

    const fn nullable(name: &'static str, title: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            title,
            field_type,
            nullable: true,
        }
    }

    fn type_value(&self) -> Value {
        if self.nullable {
            json!(["null", self.field_type.as_str()])
        } else {
            json!(self.field_type.as_str())
        }
    }
}

/// Static descriptor of the document layout for one schema version
#[derive(Debug, Clone, Copy)]
pub struct SchemaDefinition {
    pub entity: &'static str,
    pub version: &'static str,
    pub fields: &'static [FieldSpec],
    pub indexed: &'static [&'static str],
    pub default_fields: &'static [&'static str],
    pub cache: bool,
}

const AUDIT_FIELDS: &[&str] = &["email", "workspace", "creationDate", "appVersion"];

pub const CHECKOUT_CUSTOM_SCHEMA: SchemaDefinition = SchemaDefinition {
    entity: DATA_ENTITY,
    version: SCHEMA_VERSION,
    fields: &[
        FieldSpec::required("email", "Email", FieldType::String),
        FieldSpec::required("workspace", "Workspace", FieldType::String),
        FieldSpec::required("creationDate", "Creation Date", FieldType::String),
        FieldSpec::required("appVersion", "App Version", FieldType::String),
        FieldSpec::nullable("layout", "Layout", FieldType::Object),
        FieldSpec::nullable("colors", "Colors", FieldType::Object),
        FieldSpec::nullable("javascript", "Custom Javascript", FieldType::String),
        FieldSpec::nullable("css", "Custom CSS", FieldType::String),
        FieldSpec::required(
            "javascriptActive",
            "Activate custom Javascript",
            FieldType::Boolean,
        ),
        FieldSpec::required("cssActive", "Activate custom CSS", FieldType::Boolean),
        FieldSpec::nullable("javascriptBuild", "Javascript Build", FieldType::String),
        FieldSpec::nullable("cssBuild", "CSS Build", FieldType::String),
    ],
    indexed: AUDIT_FIELDS,
    default_fields: AUDIT_FIELDS,
    cache: false,
};

impl SchemaDefinition {
    /// Body sent to the store when declaring this schema
    pub fn body(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            properties.insert(
                field.name.to_string(),
                json!({ "type": field.type_value(), "title": field.title }),
            );
        }

        json!({
            "properties": properties,
            "v-indexed": self.indexed,
            "v-default-fields": self.default_fields,
            "v-cache": self.cache,
        })
    }

    /// Compact `name:type` listing used to pin a version to its field layout
    pub fn layout(&self) -> String {
        self.fields
            .iter()
            .map(|f| {
                let nullable = if f.nullable { "?" } else { "" };
                format!("{}:{}{}", f.name, f.field_type.as_str(), nullable)
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err(format!("Schema for {} has an empty version", self.entity));
        }

        let mut names = HashSet::new();
        for field in self.fields {
            if !names.insert(field.name) {
                return Err(format!("Duplicate schema field: {}", field.name));
            }
        }

        for name in self.indexed.iter().chain(self.default_fields) {
            if !names.contains(name) {
                return Err(format!("Schema references undeclared field: {}", name));
            }
        }

        Ok(())
    }
}
