use std::time::Duration;

use anyhow::{Context, Result};

use crate::gateway::DEFAULT_TIMEOUT;
use crate::report::OverflowPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis_service_url: String,
    pub analysis_timeout: Duration,
    /// Redis slot backend; the in-memory backend is used when unset.
    pub redis_url: Option<String>,
    pub session_ttl: Duration,
    pub max_upload_bytes: usize,
    pub report_overflow: OverflowPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let paginate: bool = parse_or(&lookup, "REPORT_PAGINATE", false)?;

        Ok(Config {
            analysis_service_url: lookup("ANALYSIS_SERVICE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            analysis_timeout: positive_secs(&lookup, "ANALYSIS_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?,
            redis_url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
            session_ttl: positive_secs(&lookup, "SESSION_TTL_SECS", 86_400)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            report_overflow: if paginate {
                OverflowPolicy::Paginate
            } else {
                OverflowPolicy::SinglePage
            },
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// A whole number of seconds that must be at least 1.
fn positive_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration> {
    let secs: u64 = parse_or(lookup, key, default)?;
    anyhow::ensure!(secs > 0, "Environment variable '{key}' must be at least 1 second");
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.analysis_service_url, "http://localhost:8000");
        assert_eq!(config.analysis_timeout, Duration::from_secs(30));
        assert_eq!(config.redis_url, None);
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert_eq!(config.report_overflow, OverflowPolicy::SinglePage);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ANALYSIS_SERVICE_URL", "http://analysis:9000"),
            ("ANALYSIS_TIMEOUT_SECS", "5"),
            ("REDIS_URL", "redis://cache:6379"),
            ("REPORT_PAGINATE", "true"),
            ("PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(config.analysis_service_url, "http://analysis:9000");
        assert_eq!(config.analysis_timeout, Duration::from_secs(5));
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.report_overflow, OverflowPolicy::Paginate);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_blank_redis_url_means_in_memory() {
        let config = config_from(&[("REDIS_URL", "  ")]).unwrap();
        assert_eq!(config.redis_url, None);
    }

    #[test]
    fn test_zero_durations_are_rejected() {
        for key in ["SESSION_TTL_SECS", "ANALYSIS_TIMEOUT_SECS"] {
            let err = config_from(&[(key, "0")]).unwrap_err();
            assert!(err.to_string().contains(key), "{key} = 0 should fail startup");
        }
    }

    #[tokio::test]
    async fn test_shortest_ttl_still_reads_back_after_put() {
        use crate::models::analysis::tests::sample_result;
        use crate::session::SessionId;
        use crate::store::ResultStore;

        let config = config_from(&[("SESSION_TTL_SECS", "1")]).unwrap();
        let store = ResultStore::in_memory(config.session_ttl);
        let session = SessionId::mint();
        store.put(&session, &sample_result()).await.unwrap();
        assert_eq!(store.get(&session).await, Some(sample_result()));
    }

    #[test]
    fn test_invalid_number_fails_with_context() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
