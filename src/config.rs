use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_SOURCE_URL: &str = "https://www.ipokiso.com/company/index.html";
pub const DEFAULT_BASE_URL: &str = "https://www.ipokiso.com";
const DEFAULT_DELAY_MS: i64 = 1000;
const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Runtime settings. Defaults are the production site; `IPO_*` env vars override them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source_url: String,
    pub base_url: String,
    pub delay_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix("IPO").try_parsing(true))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("source_url", DEFAULT_SOURCE_URL)?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("delay_ms", DEFAULT_DELAY_MS)?
            .set_default("user_agent", default_user_agent())?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(env)
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Invalid IPO_* setting")
    }
}

fn default_user_agent() -> String {
    format!("ipo_scraper/{}", env!("CARGO_PKG_VERSION"))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("IPO")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_match_production_site() {
        let s = Settings::from_environment(env_from(&[])).unwrap();
        assert_eq!(s.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(s.base_url, "https://www.ipokiso.com");
        assert_eq!(s.delay_ms, 1000);
        assert_eq!(s.timeout_secs, 30);
        assert!(s.user_agent.starts_with("ipo_scraper/"));
    }

    #[test]
    fn env_overrides_defaults() {
        let s = Settings::from_environment(env_from(&[
            ("IPO_SOURCE_URL", "http://127.0.0.1:8080/list.html"),
            ("IPO_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(s.source_url, "http://127.0.0.1:8080/list.html");
        assert_eq!(s.delay_ms, 0);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn non_numeric_delay_is_rejected() {
        let err = Settings::from_environment(env_from(&[("IPO_DELAY_MS", "soon")])).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid IPO_* setting"));
    }
}
