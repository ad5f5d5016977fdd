pub mod client;
pub mod cloudflare;
pub mod ipapi;
pub mod models;

pub use client::{DnsApiClient, GeoApiClient};
pub use cloudflare::CloudflareClient;
pub use ipapi::IpApiClient;
