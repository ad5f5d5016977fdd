use crate::api::{cloudflare::API_BASE_URL, ipapi::BATCH_URL};
use crate::resolver::DOH_URL;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOMAINS: &[&str] = &["bestcf"];
pub const DEFAULT_RECORD_TTL: u32 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Credentials and tuning for one run.
pub struct Config {
    pub api_token: String,
    pub zone_id: String,
    pub zone_name: String,
    pub settings: Settings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("zone_name", &self.zone_name)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Optional tuning file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub domains: Vec<String>,
    pub record_ttl: u32,
    pub http_timeout_secs: u64,
    pub doh_url: String,
    pub geo_url: String,
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            record_ttl: DEFAULT_RECORD_TTL,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            doh_url: DOH_URL.to_string(),
            geo_url: BATCH_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }
}
