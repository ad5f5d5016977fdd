use super::models::*;
use anyhow::Result;
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Record management on a single DNS zone.
#[async_trait]
pub trait DnsApiClient: Send + Sync {
    /// Every A record whose fully qualified name is `name`, across all pages.
    async fn list_records(&self, name: &str) -> Result<Vec<ApiDnsRecord>>;
    async fn delete_record(&self, record_id: &str) -> Result<()>;
    /// The created record, or `None` when the provider accepted the request
    /// but its answer could not be read.
    async fn create_record(&self, record: &NewDnsRecord) -> Result<Option<ApiDnsRecord>>;
}

/// Bulk IP geolocation.
#[async_trait]
pub trait GeoApiClient: Send + Sync {
    async fn lookup_batch(&self, batch: &[Ipv4Addr]) -> Result<Vec<GeoRecord>>;
}
