mod api;
mod config;
mod ddns;
mod geo;
mod reconcile;
mod resolver;

#[cfg(test)]
mod tests;

use anyhow::Result;
use config::Config;
use ddns::CountryDdns;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    info!("Syncing zone {} from {:?}", config.zone_name, config.settings.domains);

    let http = config.http_client()?;
    let summary = CountryDdns::from_config(&config, http).run().await;

    let (found, deleted, created, failed) = summary.reports.iter().fold(
        (0, 0, 0, 0),
        |(found, deleted, created, failed), r| {
            (found + r.found, deleted + r.deleted, created + r.created, failed + r.failed)
        },
    );
    info!(
        "Pushed {} IPs across {} countries: {}/{} stale records deleted, {} created, {} calls failed",
        summary.total_ips,
        summary.reports.len(),
        deleted,
        found,
        created,
        failed
    );

    println!("DNS records update complete.");
    Ok(())
}
