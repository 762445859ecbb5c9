// ⚙️ Configuration - environment variables, optionally from a .env file

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "GPA_TRACKER_ADDR";
pub const TITLE_VAR: &str = "GPA_TRACKER_TITLE";

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TITLE: &str = "GPA Tracker";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the web server listens on
    pub bind_addr: SocketAddr,

    /// Page title for every rendered page
    pub site_title: String,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = value(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: {:?}", ADDR_VAR, raw_addr))?;

        let site_title = value(TITLE_VAR).unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(AppConfig {
            bind_addr,
            site_title,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            site_title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ADDR_VAR, "127.0.0.1:8080"),
            (TITLE_VAR, "Ryder's GPA"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.site_title, "Ryder's GPA");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ADDR_VAR, "  "), (TITLE_VAR, "")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_address() {
        let err = AppConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ADDR_VAR));
    }
}
