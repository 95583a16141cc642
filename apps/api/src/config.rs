use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::export::raster::MAX_PIXEL_RATIO;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Device pixels per point when snapshotting a page for export.
    pub export_pixel_ratio: u32,
    pub max_sessions: usize,
    /// Seconds a session may sit untouched before it is evicted.
    pub session_idle_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            export_pixel_ratio: 2,
            max_sessions: 1024,
            session_idle_ttl_secs: 3600,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            export_pixel_ratio: parse_or(&lookup, "EXPORT_PIXEL_RATIO", defaults.export_pixel_ratio)?,
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", defaults.max_sessions)?,
            session_idle_ttl_secs: parse_or(&lookup, "SESSION_IDLE_TTL_SECS", defaults.session_idle_ttl_secs)?,
        };

        if !(1..=MAX_PIXEL_RATIO).contains(&config.export_pixel_ratio) {
            bail!("EXPORT_PIXEL_RATIO must be between 1 and {MAX_PIXEL_RATIO}");
        }
        if config.max_sessions == 0 {
            bail!("MAX_SESSIONS must be at least 1");
        }
        if config.session_idle_ttl_secs == 0 {
            bail!("SESSION_IDLE_TTL_SECS must be at least 1");
        }
        Ok(config)
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.export_pixel_ratio, 2);
        assert_eq!(config.max_sessions, 1024);
        assert_eq!(config.session_idle_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("EXPORT_PIXEL_RATIO", "3"),
            ("RUST_LOG", "debug"),
            ("SESSION_IDLE_TTL_SECS", "900"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.export_pixel_ratio, 3);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.session_idle_ttl_secs, 900);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(load(&[("EXPORT_PIXEL_RATIO", "0")]).is_err());
        assert!(load(&[("EXPORT_PIXEL_RATIO", "5")]).is_err());
        assert!(load(&[("MAX_SESSIONS", "0")]).is_err());
        assert!(load(&[("SESSION_IDLE_TTL_SECS", "0")]).is_err());
        assert!(load(&[("SESSION_IDLE_TTL_SECS", "-5")]).is_err());
    }
}
