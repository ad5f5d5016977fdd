pub mod models;

pub use models::{Config, Settings};

use anyhow::{Context, Result};
use log::{info, warn};
use std::{env, fs::File, io::Read, path::Path, time::Duration};

pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";
pub const ZONE_ID_VAR: &str = "CLOUDFLARE_ZONE_ID";
pub const ZONE_NAME_VAR: &str = "CLOUDFLARE_ZONE_NAME";
pub const CONFIG_PATH_VAR: &str = "GEODNS_CONFIG";

impl Config {
    /// Reads credentials from the environment and, when `GEODNS_CONFIG` is
    /// set, the tuning file it points at.
    ///
    /// Missing credentials are only warned about; the provider rejects them.
    pub fn from_env() -> Result<Self> {
        let settings = match env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.is_empty() => {
                info!("Loading settings from {}", path);
                Settings::load(&path)?
            }
            _ => Settings::default(),
        };

        Ok(Self::from_lookup(|key| env::var(key).ok(), settings))
    }

    pub fn from_lookup<F>(lookup: F, settings: Settings) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            let value = lookup(key).unwrap_or_default();
            if value.is_empty() {
                warn!("{} is not set", key);
            }
            value
        };

        Self {
            api_token: read(API_TOKEN_VAR),
            zone_id: read(ZONE_ID_VAR),
            zone_name: read(ZONE_NAME_VAR),
            settings,
        }
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.settings.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
