use super::{client::DnsApiClient, models::*};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Records requested per list page.
const PER_PAGE: u32 = 100;

pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    zone_id: String,
    base_url: String,
}

// Keeps the token out of logs.
impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn list_records(&self, name: &str) -> Result<Vec<ApiDnsRecord>> {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            debug!("Listing A records for {} (page {})", name, page);
            let page_param = page.to_string();
            let per_page = PER_PAGE.to_string();
            let response = self
                .client
                .get(self.records_url())
                .query(&[
                    ("type", "A"),
                    ("name", name),
                    ("page", page_param.as_str()),
                    ("per_page", per_page.as_str()),
                ])
                .bearer_auth(&self.api_token)
                .header("Content-Type", "application/json")
                .send()
                .await?
                .error_for_status()?;

            let text = response.text().await?;
            let parsed: ApiResponse<Vec<ApiDnsRecord>> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse API response. Response: {}", text))?;

            if !parsed.success {
                return Err(anyhow!("API request failed: {:?}", parsed.errors));
            }

            let batch = parsed.result.unwrap_or_default();
            let done = batch.is_empty()
                || parsed
                    .result_info
                    .map_or(true, |info| info.page >= info.total_pages);
            records.extend(batch);

            if done {
                return Ok(records);
            }
            page += 1;
        }
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/{}", self.records_url(), record_id))
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to delete DNS record with ID {}: {} {}",
                record_id,
                status,
                text
            ));
        }

        Ok(())
    }

    async fn create_record(&self, record: &NewDnsRecord) -> Result<Option<ApiDnsRecord>> {
        let response = self
            .client
            .post(self.records_url())
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(record)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!("Failed to create DNS record: {} {}", status, text));
        }

        // The record exists once the provider answers 2xx, whatever the body.
        let created: ApiResponse<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(created) => created,
            Err(e) => {
                debug!("Unreadable create response ({}): {}", e, text);
                return Ok(None);
            }
        };

        if !created.success {
            return Err(anyhow!(
                "Failed to create DNS record: {:?}",
                created.errors
            ));
        }

        match created.result.map(serde_json::from_value::<ApiDnsRecord>) {
            Some(Ok(record)) => Ok(Some(record)),
            _ => {
                debug!("Create response carried no readable record: {}", text);
                Ok(None)
            }
        }
    }
}

impl CloudflareClient {
    pub fn new(
        client: reqwest::Client,
        api_token: String,
        zone_id: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            api_token,
            zone_id,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, self.zone_id)
    }
}
