//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::storefront::ListingDefaults;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the backend serving the listing endpoints.
    pub api_base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Width of the page-button window.
    #[serde(default = "default_show_item")]
    pub show_item: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_per_page() -> usize {
    ListingDefaults::default().par_page
}

fn default_show_item() -> usize {
    ListingDefaults::default().show_item
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl ServerConfig {
    /// Reads `default.yaml` and the optional `{app_env}.yaml` from
    /// `config_dir`, then applies `APP_*` environment overrides.
    pub fn load(config_dir: impl AsRef<Path>, app_env: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(app_env);

        Config::builder()
            .add_source(File::with_name(&default_file.to_string_lossy()))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn listing_defaults(&self) -> ListingDefaults {
        ListingDefaults {
            par_page: self.per_page.max(1),
            show_item: self.show_item.max(1),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
