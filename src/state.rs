use std::sync::Arc;
use std::time::Instant;

use crate::clients::{DocumentStore, Gateway, SettingsStore};
use crate::config::Config;
use crate::models::SchemaDefinition;
use crate::services::{
    BuildPipeline, HistoryService, SchemaProvisioner, TemplateSource, WorkspaceService,
};

/// Per-process wiring; every service is stateless across requests
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub provisioner: Arc<SchemaProvisioner>,
    pub pipeline: Arc<BuildPipeline>,
    pub history: Arc<HistoryService>,
    pub workspaces: Arc<WorkspaceService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        schema: SchemaDefinition,
        store: Arc<dyn DocumentStore>,
        settings: Arc<dyn SettingsStore>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        let provisioner = SchemaProvisioner::new(
            store.clone(),
            settings,
            schema,
            config.app_id.clone(),
            config.app_version.clone(),
        );
        let pipeline = BuildPipeline::new(
            store.clone(),
            TemplateSource::new(config.templates_dir.clone()),
            schema,
            config.app_version.clone(),
        );
        let history = HistoryService::new(store, schema);
        let workspaces = WorkspaceService::new(
            gateway,
            config.platform_url.clone(),
            config.account.clone(),
        );

        Self {
            config,
            provisioner: Arc::new(provisioner),
            pipeline: Arc::new(pipeline),
            history: Arc::new(history),
            workspaces: Arc::new(workspaces),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
