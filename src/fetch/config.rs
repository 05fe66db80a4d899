//! Fetch configuration
//!
//! Identifying header, timeout and page limit for paginated API requests.

use std::time::Duration;

use crate::build_info::BuildInfo;

pub const ENV_USER_AGENT: &str = "NUTRIKIT_USER_AGENT";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "NUTRIKIT_FETCH_TIMEOUT_SECS";
pub const ENV_MAX_PAGES: &str = "NUTRIKIT_MAX_PAGES";

/// Settings for [`super::Paginator`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Sent as `User-Agent` unless the caller overrides it
    pub user_agent: String,
    /// Per-request timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
    /// Maximum number of pages to request; `None` follows `next` until exhausted
    pub max_pages: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: BuildInfo::current().user_agent(),
            timeout: None,
            max_pages: None,
        }
    }
}

impl FetchConfig {
    /// Defaults overridden by `NUTRIKIT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(agent) = lookup(ENV_USER_AGENT).filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }

        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!("Ignoring invalid {}: '{}'", ENV_FETCH_TIMEOUT_SECS, raw),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_PAGES) {
            match raw.trim().parse::<usize>() {
                Ok(pages) if pages > 0 => config.max_pages = Some(pages),
                _ => tracing::warn!("Ignoring invalid {}: '{}'", ENV_MAX_PAGES, raw),
            }
        }

        config
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FetchConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, FetchConfig::default());
        assert!(config.user_agent.starts_with("nutrikit/"));
        assert_eq!(config.max_pages, None);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = FetchConfig::from_lookup(lookup_from(&[
            (ENV_USER_AGENT, "importer/2.0"),
            (ENV_FETCH_TIMEOUT_SECS, "30"),
            (ENV_MAX_PAGES, "50"),
        ]));
        assert_eq!(config.user_agent, "importer/2.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.max_pages, Some(50));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = FetchConfig::from_lookup(lookup_from(&[
            (ENV_USER_AGENT, "  "),
            (ENV_FETCH_TIMEOUT_SECS, "soon"),
            (ENV_MAX_PAGES, "0"),
        ]));
        assert_eq!(config, FetchConfig::default());
    }
}
