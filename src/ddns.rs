use crate::api::{CloudflareClient, DnsApiClient, GeoApiClient, IpApiClient};
use crate::config::Config;
use crate::geo::{Geolocator, UNKNOWN_COUNTRY};
use crate::reconcile::{ReconcileReport, Reconciler};
use crate::resolver::Resolver;
use log::info;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    net::Ipv4Addr,
};

pub type CountryIpMap = BTreeMap<String, BTreeSet<Ipv4Addr>>;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub total_ips: usize,
    /// In the order the countries were pushed.
    pub reports: Vec<ReconcileReport>,
}

/// Resolves the configured domains, places every IP in a country and pushes
/// one A record set per country.
pub struct CountryDdns<D, G> {
    domains: Vec<String>,
    resolver: Resolver,
    geolocator: Geolocator<G>,
    reconciler: Reconciler<D>,
}

impl CountryDdns<CloudflareClient, IpApiClient> {
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        let settings = &config.settings;
        let dns = CloudflareClient::new(
            http.clone(),
            config.api_token.clone(),
            config.zone_id.clone(),
            settings.api_base_url.clone(),
        );

        Self::new(
            settings.domains.clone(),
            Resolver::new(http.clone(), settings.doh_url.clone()),
            Geolocator::new(IpApiClient::new(http, settings.geo_url.clone())),
            Reconciler::new(dns, config),
        )
    }
}

impl<D: DnsApiClient, G: GeoApiClient> CountryDdns<D, G> {
    pub fn new(
        domains: Vec<String>,
        resolver: Resolver,
        geolocator: Geolocator<G>,
        reconciler: Reconciler<D>,
    ) -> Self {
        Self {
            domains,
            resolver,
            geolocator,
            reconciler,
        }
    }

    /// Country code to the IPs seen for it across all domains. IPs that
    /// could not be placed are left out.
    pub async fn country_ip_map(&self) -> CountryIpMap {
        let mut map = CountryIpMap::new();

        for domain in &self.domains {
            let ips: Vec<Ipv4Addr> = self.resolver.resolve(domain).await.into_iter().collect();
            let countries = self.geolocator.geolocate(&ips).await;

            let mut located = 0;
            for ip in &ips {
                match countries.get(ip) {
                    Some(code) if code != UNKNOWN_COUNTRY => {
                        map.entry(code.clone()).or_default().insert(*ip);
                        located += 1;
                    }
                    _ => {}
                }
            }
            info!("{}: {} IPs resolved, {} located", domain, ips.len(), located);
        }

        map
    }

    pub async fn run(&self) -> RunSummary {
        println!("Scanning proxy IPs from various countries...");
        let map = self.country_ip_map().await;

        let total_ips = map.values().map(BTreeSet::len).sum();
        println!("Scanned {} IPs, Pushing DNS...", total_ips);

        let mut reports = Vec::with_capacity(map.len());
        for (country_code, ips) in push_order(&map) {
            reports.push(self.reconciler.reconcile(country_code, ips).await);
        }

        RunSummary { total_ips, reports }
    }
}

/// Countries with the most IPs first; equal sizes keep code order.
pub fn push_order(map: &CountryIpMap) -> Vec<(&str, &BTreeSet<Ipv4Addr>)> {
    let mut ordered: Vec<_> = map.iter().map(|(code, ips)| (code.as_str(), ips)).collect();
    ordered.sort_by_key(|(_, ips)| Reverse(ips.len()));
    ordered
}
