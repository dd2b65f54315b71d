pub mod customization;
pub mod schema;
pub mod settings;

pub use customization::{
    ConfigurationDocument, CustomizationView, DocumentRef, HistoryEntry, LatestCustomization,
    SaveChangesParams,
};
pub use schema::{SchemaDefinition, CHECKOUT_CUSTOM_SCHEMA};
pub use settings::{AdminSetup, AppSettings};
