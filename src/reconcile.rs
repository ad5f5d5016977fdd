use crate::api::{models::NewDnsRecord, DnsApiClient};
use crate::config::Config;
use log::{debug, error, warn};
use std::{collections::BTreeSet, net::Ipv4Addr};

/// Outcome of replacing one country's record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub country_code: String,
    /// Target IPs processed, whether or not their creation succeeded.
    pub ips: usize,
    pub found: usize,
    pub deleted: usize,
    pub created: usize,
    pub failed: usize,
}

/// Replaces the `<CC>.<zone_name>` A record set of one country at a time.
///
/// Every existing record is deleted and one record per target IP is created.
/// There is no diffing and no rollback: each provider call stands alone and
/// a failed call is logged and skipped.
pub struct Reconciler<D> {
    client: D,
    zone_name: String,
    ttl: u32,
}

impl<D: DnsApiClient> Reconciler<D> {
    pub fn new(client: D, config: &Config) -> Self {
        Self {
            client,
            zone_name: config.zone_name.clone(),
            ttl: config.settings.record_ttl,
        }
    }

    pub async fn reconcile(
        &self,
        country_code: &str,
        target_ips: &BTreeSet<Ipv4Addr>,
    ) -> ReconcileReport {
        let mut report = ReconcileReport {
            country_code: country_code.to_string(),
            ips: target_ips.len(),
            ..Default::default()
        };

        let name = format!("{}.{}", country_code, self.zone_name);
        // A failed listing falls through to creation with nothing deleted.
        match self.client.list_records(&name).await {
            Ok(records) => {
                report.found = records.len();
                for record in records {
                    debug!("Deleting {} ({} -> {})", record.id, record.name, record.content);
                    match self.client.delete_record(&record.id).await {
                        Ok(()) => {
                            println!("Deleted {} record_id: {}", country_code, record.id);
                            report.deleted += 1;
                        }
                        Err(e) => {
                            error!("Failed to delete record {} ({}): {:#}", record.id, name, e);
                            report.failed += 1;
                        }
                    }
                }
            }
            Err(e) => warn!("Failed to list existing records for {}: {:#}", name, e),
        }

        for ip in target_ips {
            let record = NewDnsRecord::a(country_code, *ip, self.ttl);
            match self.client.create_record(&record).await {
                Ok(created) => {
                    let id = created.as_ref().map_or("unknown id", |r| r.id.as_str());
                    debug!("Created {} -> {} ({})", name, ip, id);
                    report.created += 1;
                }
                Err(e) => {
                    error!("Failed to create record {} -> {}: {:#}", name, ip, e);
                    report.failed += 1;
                }
            }
        }

        println!("{}: Updated {} IPs", country_code, report.ips);
        report
    }
}
