//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Roles offered when the service cannot provide its own list.
pub const DEFAULT_ROLES: &[&str] = &[
    "ML Engineer",
    "Frontend Developer",
    "Data Analyst",
    "Backend Developer",
    "DevOps Engineer",
    "AI/NLP Engineer",
    "Full Stack Developer",
    "Cybersecurity Analyst",
];

/// Pre-fill used when the sample resume cannot be fetched.
pub const SAMPLE_PLACEHOLDER: &str =
    "Backend not running. Start it with: python -m uvicorn main:app --reload";

/// Navigator configuration.
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Base URL of the plan service, without a trailing slash.
    pub api_url: String,
    /// Wait between a successful response and the visible stage switch.
    pub grace_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            grace_delay: Duration::from_millis(2500),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl NavigatorConfig {
    /// Build from `CAREER_NAV_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("CAREER_NAV_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_url);

        let grace_delay = match lookup("CAREER_NAV_GRACE_MS") {
            Some(raw) => Duration::from_millis(parse_number("CAREER_NAV_GRACE_MS", &raw)?),
            None => defaults.grace_delay,
        };

        let request_timeout = match lookup("CAREER_NAV_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("CAREER_NAV_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_url,
            grace_delay,
            request_timeout,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected a non-negative integer, got {raw:?} ({e})"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = NavigatorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.grace_delay, Duration::from_millis(2500));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn reads_overrides_and_trims_trailing_slash() {
        let config = NavigatorConfig::from_lookup(lookup_from(&[
            ("CAREER_NAV_API_URL", "https://plans.example.com/"),
            ("CAREER_NAV_GRACE_MS", "0"),
            ("CAREER_NAV_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://plans.example.com");
        assert_eq!(config.grace_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = NavigatorConfig::from_lookup(lookup_from(&[("CAREER_NAV_GRACE_MS", "soon")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "CAREER_NAV_GRACE_MS"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_roles_are_non_empty() {
        assert_eq!(DEFAULT_ROLES.len(), 8);
        assert!(DEFAULT_ROLES.iter().all(|r| !r.trim().is_empty()));
    }
}
