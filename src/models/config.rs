//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Origin allowed by CORS. Every origin is allowed when unset.
    pub cors_origin: Option<String>,
    /// Directory with the built frontend, served with an `index.html` fallback.
    pub static_dir: Option<String>,
}
