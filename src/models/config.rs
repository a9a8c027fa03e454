//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::fetcher::RetryPolicy;
use crate::pagination::PaginationSettings;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Page sizing and row ordering of every content list.
    #[serde(default)]
    pub pagination: PaginationSettings,
    /// Backoff applied when the database is temporarily unavailable.
    #[serde(default)]
    pub retry: RetryPolicy,
}
