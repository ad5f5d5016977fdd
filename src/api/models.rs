use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiDnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub r#type: String,
    #[serde(default)]
    pub proxied: bool,
    pub ttl: u32,
}

/// Body of a record creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDnsRecord {
    pub r#type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl NewDnsRecord {
    /// An unproxied A record. `name` is relative to the zone.
    pub fn a(name: &str, ip: Ipv4Addr, ttl: u32) -> Self {
        Self {
            r#type: "A".to_string(),
            name: name.to_string(),
            content: ip.to_string(),
            ttl,
            proxied: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// Paging metadata of list responses.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ResultInfo {
    pub page: u32,
    pub total_pages: u32,
}

impl Default for ResultInfo {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

/// One entry of an ip-api.com batch response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoRecord {
    pub query: String,
    #[serde(rename = "countryCode", default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeoQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct DohResponse {
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct DohAnswer {
    #[serde(rename = "type", default)]
    pub record_type: u16,
    #[serde(default)]
    pub data: String,
}
