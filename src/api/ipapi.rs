use super::{client::GeoApiClient, models::*};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::net::Ipv4Addr;

pub const BATCH_URL: &str = "http://ip-api.com/batch";

/// Only the fields the pipeline reads.
const RESPONSE_FIELDS: &str = "query,countryCode,status,message";

/// Client for the ip-api.com bulk endpoint.
#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    url: String,
}

impl IpApiClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl GeoApiClient for IpApiClient {
    async fn lookup_batch(&self, batch: &[Ipv4Addr]) -> Result<Vec<GeoRecord>> {
        let payload: Vec<GeoQuery> = batch
            .iter()
            .map(|ip| GeoQuery {
                query: ip.to_string(),
            })
            .collect();

        debug!("Posting {} IPs to {}", payload.len(), self.url);
        let response = self
            .client
            .post(&self.url)
            .query(&[("fields", RESPONSE_FIELDS)])
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse geolocation response. Response: {}", text))
    }
}
