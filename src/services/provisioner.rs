use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{DocumentStore, SettingsStore, StoreError};
use crate::error::AppResult;
use crate::models::{AdminSetup, AppSettings, SchemaDefinition};

/// Whether the remote schema is known to match the expected version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    Current,
    /// Provisioning failed; the next setup request retries
    Stale(String),
}

#[derive(Debug, Clone)]
pub struct SetupOutcome {
    pub settings: AppSettings,
    pub status: SchemaStatus,
}

/// Keeps the document store schema in line with the running build.
///
/// The confirmed version is cached in the app settings, so once it matches
/// the expected one no remote schema call is made. The settings
/// read-modify-write is not locked: concurrent cold starts may all declare
/// the schema, which the store treats as a no-op.
pub struct SchemaProvisioner {
    store: Arc<dyn DocumentStore>,
    settings: Arc<dyn SettingsStore>,
    schema: SchemaDefinition,
    app_id: String,
    app_version: String,
}

impl SchemaProvisioner {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        settings: Arc<dyn SettingsStore>,
        schema: SchemaDefinition,
        app_id: String,
        app_version: String,
    ) -> Self {
        Self {
            store,
            settings,
            schema,
            app_id,
            app_version,
        }
    }

    pub async fn ensure_schema(&self) -> AppResult<SetupOutcome> {
        let mut settings = self.settings.get_settings(&self.app_id).await?;
        let expected = self.schema.version;

        let already_current = settings
            .admin_setup
            .as_ref()
            .is_some_and(|setup| setup.is_current(expected));

        let status = if already_current {
            debug!("Schema {} already confirmed for {}", expected, self.app_id);
            SchemaStatus::Current
        } else {
            let setup = settings.admin_setup.get_or_insert_with(AdminSetup::default);
            let status = self.provision(setup).await;
            self.settings.save_settings(&self.app_id, &settings).await?;
            status
        };

        if let Some(setup) = settings.admin_setup.as_mut() {
            setup.app_version = Some(self.app_version.clone());
        }

        Ok(SetupOutcome { settings, status })
    }

    /// Declare the schema remotely and record the result in `setup`.
    /// Never fails: a remote error only leaves the setup stale.
    async fn provision(&self, setup: &mut AdminSetup) -> SchemaStatus {
        let body = self.schema.body();
        let result = self
            .store
            .create_or_update_schema(self.schema.entity, self.schema.version, &body)
            .await;

        match result {
            Ok(()) => {
                info!(
                    "Schema {} declared for {}",
                    self.schema.version, self.schema.entity
                );
                setup.mark_current(self.schema.version);
                SchemaStatus::Current
            }
            Err(StoreError::NotModified) => {
                debug!("Schema {} already present remotely", self.schema.version);
                setup.mark_current(self.schema.version);
                SchemaStatus::Current
            }
            Err(e) => {
                warn!(
                    "Failed to declare schema {} for {}: {}",
                    self.schema.version, self.schema.entity, e
                );
                setup.mark_stale();
                SchemaStatus::Stale(e.to_string())
            }
        }
    }
}
