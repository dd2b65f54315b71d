use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::DocumentStore;
use crate::error::AppResult;
use crate::models::{ConfigurationDocument, SaveChangesParams, SchemaDefinition};
use crate::utils::{template, time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Css,
    Javascript,
}

impl ArtifactKind {
    pub fn template_file(self) -> &'static str {
        match self {
            ArtifactKind::Css => "checkout6-custom.css",
            ArtifactKind::Javascript => "checkout6-custom.js",
        }
    }
}

/// Directory holding the static build templates
#[derive(Debug, Clone)]
pub struct TemplateSource {
    dir: PathBuf,
}

impl TemplateSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.template_file())
    }

    /// Read from disk on every call
    pub async fn load(&self, kind: ArtifactKind) -> std::io::Result<String> {
        tokio::fs::read_to_string(self.path(kind)).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifacts {
    pub css_build: String,
    pub javascript_build: String,
}

/// Renders the CSS/JS artifacts for a save and appends the new document
pub struct BuildPipeline {
    store: Arc<dyn DocumentStore>,
    templates: TemplateSource,
    schema: SchemaDefinition,
    app_version: String,
}

impl BuildPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        templates: TemplateSource,
        schema: SchemaDefinition,
        app_version: String,
    ) -> Self {
        Self {
            store,
            templates,
            schema,
            app_version,
        }
    }

    pub async fn build(&self, params: &SaveChangesParams) -> AppResult<BuildArtifacts> {
        let values = params.template_values();

        let css_build = self
            .render(ArtifactKind::Css, &values, params.css_active, params.css.as_deref())
            .await?;
        let javascript_build = self
            .render(
                ArtifactKind::Javascript,
                &values,
                params.javascript_active,
                params.javascript.as_deref(),
            )
            .await?;

        Ok(BuildArtifacts {
            css_build,
            javascript_build,
        })
    }

    async fn render(
        &self,
        kind: ArtifactKind,
        values: &serde_json::Map<String, serde_json::Value>,
        active: bool,
        source: Option<&str>,
    ) -> AppResult<String> {
        let template_text = self.templates.load(kind).await?;

        let missing = template::missing_keys(&template_text, values);
        if !missing.is_empty() {
            debug!("{:?} template keys without a value: {:?}", kind, missing);
        }

        let mut output = template::render(&template_text, values);
        if active {
            output.push_str(source.unwrap_or_default());
        }
        Ok(output)
    }

    /// Validate, render, stamp and persist a new document.
    /// Returns the store acknowledgment serialized as JSON.
    pub async fn save_changes(&self, params: SaveChangesParams) -> AppResult<String> {
        params.check()?;

        let artifacts = self.build(&params).await?;

        let document = ConfigurationDocument {
            email: params.email,
            workspace: params.workspace,
            creation_date: time::current_timestamp_millis().to_string(),
            app_version: self.app_version.clone(),
            layout: params.layout,
            colors: params.colors,
            javascript: params.javascript,
            css: params.css,
            javascript_active: params.javascript_active,
            css_active: params.css_active,
            javascript_build: Some(artifacts.javascript_build),
            css_build: Some(artifacts.css_build),
        };

        let ack = self
            .store
            .create_document(
                self.schema.entity,
                serde_json::to_value(&document)?,
                self.schema.version,
            )
            .await?;

        info!(
            "Saved customization for workspace {} at {}",
            document.workspace, document.creation_date
        );

        Ok(serde_json::to_string(&ack)?)
    }
}
