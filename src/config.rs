use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Application identity
    pub account: String,
    pub app_id: String,
    pub app_version: String,
    pub app_token: Option<String>,

    // Collaborator endpoints
    pub document_store_url: String,
    pub settings_store_url: String,
    pub platform_url: String,
    pub http_timeout_secs: u64,

    // Build assets
    pub templates_dir: PathBuf,

    pub cors_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,

            account: String::new(),
            app_id: String::new(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            app_token: None,

            // Empty means "derive from the account"
            document_store_url: String::new(),
            settings_store_url: String::new(),
            platform_url: "http://platform.io.vtex.com".to_string(),
            http_timeout_secs: 30,

            templates_dir: PathBuf::from("./templates"),

            cors_allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(host) = env::var("CUSTOMIZER_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("CUSTOMIZER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| format!("Invalid CUSTOMIZER_PORT: {}", e))?;
        }

        config.account =
            env::var("VTEX_ACCOUNT").map_err(|_| "VTEX_ACCOUNT must be set".to_string())?;
        config.app_id = env::var("VTEX_APP_ID").map_err(|_| "VTEX_APP_ID must be set".to_string())?;

        if let Ok(version) = env::var("VTEX_APP_VERSION") {
            config.app_version = version;
        }

        config.app_token = env::var("VTEX_APP_TOKEN").ok().filter(|t| !t.is_empty());

        if let Ok(url) = env::var("DOCUMENT_STORE_URL") {
            config.document_store_url = url;
        }

        if let Ok(url) = env::var("SETTINGS_STORE_URL") {
            config.settings_store_url = url;
        }

        if let Ok(url) = env::var("PLATFORM_URL") {
            config.platform_url = url;
        }

        if let Ok(timeout) = env::var("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = timeout
                .parse()
                .map_err(|e| format!("Invalid HTTP_TIMEOUT_SECS: {}", e))?;
        }

        if let Ok(dir) = env::var("TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(dir);
        }

        if let Ok(origin) = env::var("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        config.resolve_endpoints();
        config.validate()?;

        Ok(config)
    }

    /// Fill endpoints left empty with the account-scoped defaults
    pub fn resolve_endpoints(&mut self) {
        if self.document_store_url.is_empty() {
            self.document_store_url =
                format!("http://{}.vtexcommercestable.com.br/api", self.account);
        }
        if self.settings_store_url.is_empty() {
            self.settings_store_url = format!("http://apps.{}.myvtex.com", self.account);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.account.trim().is_empty() {
            return Err("VTEX_ACCOUNT must not be empty".to_string());
        }
        if self.app_id.trim().is_empty() {
            return Err("VTEX_APP_ID must not be empty".to_string());
        }
        if self.app_version.trim().is_empty() {
            return Err("VTEX_APP_VERSION must not be empty".to_string());
        }
        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
