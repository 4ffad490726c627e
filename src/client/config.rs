//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:3000`. The `/api` prefix is appended.
    pub base_url: String,
    pub page_size: usize,
    /// Quiet interval before typed search text is committed.
    pub debounce_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            page_size: DEFAULT_ITEMS_PER_PAGE,
            debounce_ms: 500,
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
