use crate::api::models::DohResponse;
use anyhow::Result;
use log::{debug, warn};
use std::{collections::BTreeSet, net::Ipv4Addr};

pub const DOH_URL: &str = "https://doh.360.cn/resolve";

/// Numeric RR type of an A record.
const A_RECORD_TYPE: u16 = 1;

/// Looks up A records through a DNS-over-HTTPS JSON endpoint.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: reqwest::Client,
    url: String,
}

impl Resolver {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    /// IPv4 addresses `domain` currently resolves to. Any failure yields an
    /// empty set so the run can continue with the next domain.
    pub async fn resolve(&self, domain: &str) -> BTreeSet<Ipv4Addr> {
        match self.query_a(domain).await {
            Ok(ips) => {
                debug!("{} resolved to {} IPs", domain, ips.len());
                ips
            }
            Err(e) => {
                warn!("Failed to resolve {}: {:#}", domain, e);
                BTreeSet::new()
            }
        }
    }

    async fn query_a(&self, domain: &str) -> Result<BTreeSet<Ipv4Addr>> {
        let response: DohResponse = self
            .client
            .get(&self.url)
            .query(&[("name", domain), ("type", "A")])
            .header("Accept", "application/dns-json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .answer
            .into_iter()
            .filter(|answer| answer.record_type == A_RECORD_TYPE)
            .filter_map(|answer| answer.data.parse().ok())
            .collect())
    }
}
