use crate::logger::Logger;
use anyhow::{Result, bail};
use serde_json::json;
use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 4030;
const DEFAULT_USERNAME: &str = "samranjithpaul";
const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_LANGUAGES_TTL_SECONDS: u64 = 60 * 60;
const DEFAULT_STARRED_TTL_SECONDS: u64 = 5 * 60;
const DEFAULT_STARRED_PER_PAGE: u64 = 8;
const DEFAULT_MIN_LANGUAGE_PERCENTAGE: u64 = 2;
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_USER_AGENT: &str = "terminal-portfolio-github-proxy";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub github: GithubConfig,
    pub cache: CacheConfig,
    pub min_language_percentage: u32,
    pub cors_allow_origin: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct GithubConfig {
    pub username: String,
    pub token: Option<String>,
    pub api_base_url: String,
    pub starred_per_page: u32,
    pub request_timeout: Duration,
    pub user_agent: String,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub languages_ttl: Duration,
    pub starred_ttl: Duration,
}

impl Config {
    pub fn load(logger: &Logger) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), logger)
    }

    /// Builds the config from any key lookup, `env::var` in production.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, logger: &Logger) -> Result<Self> {
        let port = parse_port(lookup("PORT"), DEFAULT_PORT);

        let username = non_empty(lookup("GITHUB_USERNAME"))
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        if !is_valid_username(&username) {
            bail!("GITHUB_USERNAME {username:?} is not a valid GitHub login");
        }

        let token = non_empty(lookup("GITHUB_TOKEN"));
        if token.is_none() {
            logger.warn(
                "config.github_token_missing",
                json!({ "message": "No GITHUB_TOKEN set, using unauthenticated requests (60/hour limit)" }),
            );
        }

        let api_base_url = trim_trailing_slash(
            non_empty(lookup("GITHUB_API_BASE_URL"))
                .as_deref()
                .unwrap_or(DEFAULT_GITHUB_API_BASE_URL),
        );
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            bail!("GITHUB_API_BASE_URL must be an http(s) URL, got {api_base_url:?}");
        }

        let github = GithubConfig {
            username,
            token,
            api_base_url,
            starred_per_page: parse_positive_u64(
                lookup("STARRED_PER_PAGE"),
                DEFAULT_STARRED_PER_PAGE,
            )
            .min(100) as u32,
            request_timeout: Duration::from_millis(parse_positive_u64(
                lookup("UPSTREAM_TIMEOUT_MS"),
                DEFAULT_UPSTREAM_TIMEOUT_MS,
            )),
            user_agent: non_empty(lookup("GITHUB_USER_AGENT"))
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        let cache = CacheConfig {
            languages_ttl: Duration::from_secs(parse_positive_u64(
                lookup("LANGUAGES_CACHE_TTL_SECONDS"),
                DEFAULT_LANGUAGES_TTL_SECONDS,
            )),
            starred_ttl: Duration::from_secs(parse_positive_u64(
                lookup("STARRED_CACHE_TTL_SECONDS"),
                DEFAULT_STARRED_TTL_SECONDS,
            )),
        };

        let min_language_percentage = parse_u64(
            lookup("MIN_LANGUAGE_PERCENTAGE"),
            DEFAULT_MIN_LANGUAGE_PERCENTAGE,
        )
        .min(100) as u32;

        let cors_allow_origin =
            non_empty(lookup("CORS_ALLOW_ORIGIN")).unwrap_or_else(|| "*".to_string());

        let request_timeout = Duration::from_millis(parse_positive_u64(
            lookup("REQUEST_TIMEOUT_MS"),
            DEFAULT_REQUEST_TIMEOUT_MS,
        ));

        Ok(Self {
            port,
            github,
            cache,
            min_language_percentage,
            cors_allow_origin,
            request_timeout,
        })
    }
}

fn parse_port(value: Option<String>, fallback: u16) -> u16 {
    value
        .and_then(|raw| raw.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(fallback)
}

fn parse_positive_u64(value: Option<String>, fallback: u64) -> u64 {
    value
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(fallback)
}

// Zero is a legal threshold, so only garbage falls back.
fn parse_u64(value: Option<String>, fallback: u64) -> u64 {
    value
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(fallback)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn trim_trailing_slash(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn is_valid_username(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 39
        && !value.starts_with('-')
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogLevel;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn quiet() -> Logger {
        Logger::with_level("test", "host", LogLevel::Error)
    }

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned(), &quiet())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 4030);
        assert_eq!(config.github.username, "samranjithpaul");
        assert_eq!(config.github.token, None);
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.starred_per_page, 8);
        assert_eq!(config.github.request_timeout, Duration::from_secs(10));
        assert_eq!(config.cache.languages_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache.starred_ttl, Duration::from_secs(300));
        assert_eq!(config.min_language_percentage, 2);
        assert_eq!(config.cors_allow_origin, "*");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_trimmed_and_bounded() {
        let config = load(&[
            ("PORT", "8088"),
            ("GITHUB_TOKEN", "  ghp_token  "),
            ("GITHUB_API_BASE_URL", "http://github.test/"),
            ("STARRED_PER_PAGE", "500"),
            ("MIN_LANGUAGE_PERCENTAGE", "0"),
            ("LANGUAGES_CACHE_TTL_SECONDS", "-4"),
        ])
        .unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.github.token.as_deref(), Some("ghp_token"));
        assert_eq!(config.github.api_base_url, "http://github.test");
        assert_eq!(config.github.starred_per_page, 100);
        assert_eq!(config.min_language_percentage, 0);
        assert_eq!(config.cache.languages_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn rejects_bad_usernames_and_urls() {
        assert!(load(&[("GITHUB_USERNAME", "../etc")]).is_err());
        assert!(load(&[("GITHUB_API_BASE_URL", "ftp://github.test")]).is_err());
    }
}
