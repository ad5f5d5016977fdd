use crate::api::GeoApiClient;
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::{collections::HashMap, net::Ipv4Addr};

/// Largest batch the bulk endpoint accepts.
pub const BATCH_LIMIT: usize = 99;

/// Upper bound on batch requests in flight at once.
pub const MAX_IN_FLIGHT: usize = 10;

/// Country code for IPs the provider could not place.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

pub struct Geolocator<C> {
    client: C,
}

impl<C: GeoApiClient> Geolocator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Maps each IP the provider answered for to its country code, or
    /// `UNKNOWN_COUNTRY` when the answer carried none.
    ///
    /// IPs from a batch whose request failed are absent from the result.
    /// Answers are keyed by their `query` field, so batch completion order
    /// does not matter.
    pub async fn geolocate(&self, ips: &[Ipv4Addr]) -> HashMap<Ipv4Addr, String> {
        let answers: Vec<_> = stream::iter(ips.chunks(BATCH_LIMIT).enumerate())
            .map(|(index, batch)| async move {
                match self.client.lookup_batch(batch).await {
                    Ok(records) => Some(records),
                    Err(e) => {
                        warn!(
                            "Geolocation batch {} ({} IPs) failed: {:#}",
                            index,
                            batch.len(),
                            e
                        );
                        None
                    }
                }
            })
            .buffer_unordered(MAX_IN_FLIGHT)
            .filter_map(|records| async { records })
            .collect()
            .await;

        let mut countries = HashMap::with_capacity(ips.len());
        for record in answers.into_iter().flatten() {
            let ip: Ipv4Addr = match record.query.parse() {
                Ok(ip) => ip,
                Err(_) => {
                    debug!("Skipping geolocation answer for {:?}", record.query);
                    continue;
                }
            };

            let country = match record.country_code.filter(|code| !code.is_empty()) {
                Some(code) => code,
                None => {
                    debug!(
                        "{} not located ({}): {}",
                        ip,
                        record.status.as_deref().unwrap_or("no status"),
                        record.message.as_deref().unwrap_or("no country code")
                    );
                    UNKNOWN_COUNTRY.to_string()
                }
            };
            countries.insert(ip, country);
        }

        countries
    }
}
