
use crate::api::models::{ApiDnsRecord, GeoRecord, NewDnsRecord};
use crate::api::{DnsApiClient, GeoApiClient};
use crate::config::{Config, Settings};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::{Request, Respond, ResponseTemplate};

pub const ZONE_ID: &str = "zone123";
pub const ZONE_NAME: &str = "example.com";
pub const API_TOKEN: &str = "test_token";

pub fn test_config(settings: Settings) -> Config {
    Config::from_lookup(
        |key| match key {
            "CLOUDFLARE_API_TOKEN" => Some(API_TOKEN.to_string()),
            "CLOUDFLARE_ZONE_ID" => Some(ZONE_ID.to_string()),
            "CLOUDFLARE_ZONE_NAME" => Some(ZONE_NAME.to_string()),
            _ => None,
        },
        settings,
    )
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

/// `count` distinct addresses starting at 10.0.0.1.
pub fn ip_range(count: usize) -> Vec<Ipv4Addr> {
    (1..=count as u32)
        .map(|n| Ipv4Addr::from(u32::from(Ipv4Addr::new(10, 0, 0, 0)) + n))
        .collect()
}

pub fn api_record(id: &str, name: &str, content: &str) -> ApiDnsRecord {
    ApiDnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        r#type: "A".to_string(),
        proxied: false,
        ttl: 60,
    }
}

/// Answers an ip-api.com batch body, placing each IP with `locate`.
pub struct EchoCountry(pub fn(&str) -> Option<&'static str>);

impl Respond for EchoCountry {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let queries: Vec<serde_json::Value> = serde_json::from_slice(&request.body).unwrap();
        let body: Vec<serde_json::Value> = queries
            .iter()
            .map(|q| {
                let ip = q["query"].as_str().unwrap();
                match (self.0)(ip) {
                    Some(code) => json!({"status": "success", "countryCode": code, "query": ip}),
                    None => json!({"status": "fail", "message": "private range", "query": ip}),
                }
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsCall {
    List(String),
    Delete(String),
    Create(NewDnsRecord),
}

/// In-memory zone that records every call made against it.
#[derive(Default)]
pub struct RecordingDns {
    pub calls: Arc<Mutex<Vec<DnsCall>>>,
    pub existing: HashMap<String, Vec<ApiDnsRecord>>,
    pub fail_list: bool,
    pub fail_deletes: HashSet<String>,
    pub fail_creates: HashSet<String>,
}

impl RecordingDns {
    fn record(&self, call: DnsCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DnsApiClient for RecordingDns {
    async fn list_records(&self, name: &str) -> Result<Vec<ApiDnsRecord>> {
        self.record(DnsCall::List(name.to_string()));
        if self.fail_list {
            return Err(anyhow!("connection reset"));
        }
        Ok(self.existing.get(name).cloned().unwrap_or_default())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.record(DnsCall::Delete(record_id.to_string()));
        if self.fail_deletes.contains(record_id) {
            return Err(anyhow!("404 Not Found"));
        }
        Ok(())
    }

    async fn create_record(&self, record: &NewDnsRecord) -> Result<Option<ApiDnsRecord>> {
        self.record(DnsCall::Create(record.clone()));
        if self.fail_creates.contains(&record.content) {
            return Err(anyhow!("400 Bad Request"));
        }
        Ok(Some(api_record("new", &record.name, &record.content)))
    }
}

#[derive(Default)]
pub struct GeoStats {
    pub requests: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

/// Geolocation stand-in that tracks request concurrency.
#[derive(Default)]
pub struct FakeGeo {
    pub stats: Arc<GeoStats>,
    pub countries: HashMap<Ipv4Addr, String>,
    /// Batches containing this IP fail.
    pub poison: Option<Ipv4Addr>,
    pub delay: Duration,
    /// Answer each batch back to front.
    pub reverse: bool,
}

#[async_trait]
impl GeoApiClient for FakeGeo {
    async fn lookup_batch(&self, batch: &[Ipv4Addr]) -> Result<Vec<GeoRecord>> {
        self.stats.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(poison) = self.poison {
            if batch.contains(&poison) {
                return Err(anyhow!("503 Service Unavailable"));
            }
        }

        let mut records: Vec<GeoRecord> = batch
            .iter()
            .map(|ip| GeoRecord {
                query: ip.to_string(),
                country_code: self.countries.get(ip).cloned(),
                status: Some("success".to_string()),
                message: None,
            })
            .collect();
        if self.reverse {
            records.reverse();
        }
        Ok(records)
    }
}
