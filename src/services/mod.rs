pub mod build;
pub mod history;
pub mod provisioner;
pub mod workspaces;

pub use build::{BuildPipeline, TemplateSource};
pub use history::HistoryService;
pub use provisioner::{SchemaProvisioner, SchemaStatus};
pub use workspaces::WorkspaceService;
