//! Connection settings, read from a TOML file and `DDMON_*` environment
//! variables. Environment variables win over the file.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use ddmon_client::{Client, ReqwestTransport, DEFAULT_BASE_URL};

/// Prefix for environment overrides, e.g. `DDMON_API_KEY`.
pub const ENV_PREFIX: &str = "DDMON";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub app_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Settings {
    /// Build an API client from these settings.
    pub fn client(&self) -> Result<Client> {
        let transport = ReqwestTransport::builder()
            .base_url(&self.base_url)
            .credentials(&self.api_key, &self.app_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        Ok(Client::with_transport(transport))
    }
}

/// Load settings from `path` (optional) and the environment.
pub fn load_settings(path: &Path) -> Result<Settings> {
    load_with_prefix(path, ENV_PREFIX)
}

fn load_with_prefix(path: &Path, prefix: &str) -> Result<Settings> {
    tracing::debug!("Loading settings from {:?} and {}_* variables", path, prefix);

    let settings = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix(prefix))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
