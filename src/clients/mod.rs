pub mod apps;
pub mod hub;
pub mod masterdata;
pub mod types;

#[cfg(test)]
pub mod http_stub;
#[cfg(test)]
pub mod memory;

pub use apps::AppsClient;
pub use hub::HubClient;
pub use masterdata::{MasterDataClient, AUTH_COOKIE_HEADER};
pub use types::{DocumentStore, Gateway, SearchQuery, SettingsStore, Sort, StoreError};

use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client for every collaborator
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
