use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub upstream: UpstreamConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

/// Where the authoritative MakeAPI data service lives and how we query it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream REST service (endpoints, items, auth).
    pub base_url: String,
    /// Hard cap applied to the filtered item query. Items past the cap are
    /// simply absent from embedded/list responses.
    pub item_query_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether the session cookie carries the Secure attribute.
    pub cookie_secure: bool,
    /// Session cookie lifetime in seconds.
    pub cookie_max_age_secs: i64,
}

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://makeapi.netlify.app";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("MAKEAPI_BASE_URL") {
            if !v.trim().is_empty() {
                self.upstream.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("MAKEAPI_ITEM_QUERY_LIMIT") {
            self.upstream.item_query_limit = v.parse().unwrap_or(self.upstream.item_query_limit);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.cookie_secure = v.parse().unwrap_or(self.session.cookie_secure);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_MAX_AGE_SECS") {
            self.session.cookie_max_age_secs = v.parse().unwrap_or(self.session.cookie_max_age_secs);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            upstream: UpstreamConfig {
                base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
                item_query_limit: 200,
            },
            session: SessionConfig {
                cookie_secure: false,
                cookie_max_age_secs: 60 * 60 * 24 * 7, // 7 days
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            upstream: UpstreamConfig {
                base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
                item_query_limit: 200,
            },
            session: SessionConfig {
                cookie_secure: true,
                cookie_max_age_secs: 60 * 60 * 24 * 7,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream.item_query_limit, 200);
        assert!(!config.session.cookie_secure);
        assert_eq!(config.session.cookie_max_age_secs, 604_800);
    }

    #[test]
    fn production_sets_secure_cookie() {
        let config = AppConfig::production();
        assert!(config.session.cookie_secure);
        assert_eq!(config.upstream.item_query_limit, 200);
    }
}
