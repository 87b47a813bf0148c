//! Defaults applied to scraped input.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_host() -> String {
    "neu.edu".to_string()
}

fn default_sub_college() -> String {
    "NEU".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    /// Registration host the scraper targets (first identity coordinate).
    #[serde(default = "default_host")]
    pub host: String,

    /// Sub-college whose terms `regsync terms` lists by default.
    #[serde(default = "default_sub_college")]
    pub sub_college: String,

    /// Whether reconciliation deletes stale courses in covered terms.
    #[serde(default)]
    pub destroy: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            sub_college: default_sub_college(),
            destroy: false,
        }
    }
}

impl ScrapeConfig {
    /// Reject values that would produce unusable identity keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the host is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scrape.host".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
