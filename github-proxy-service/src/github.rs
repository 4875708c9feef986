use crate::config::GithubConfig;
use crate::logger::Logger;
use async_trait::async_trait;
use portfolio_core::github::{
    DEFAULT_DESCRIPTION, LanguagePercentages, LanguageShare, LanguageStatsBody, Owner, StarredRepo,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const OWNED_REPOS_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("GitHub API returned {0}")]
    Status(u16),
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("GitHub did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Subset of `GET /users/{user}/repos` this service reads.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OwnedRepo {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
    pub languages_url: String,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct RawStarred {
    id: u64,
    name: String,
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    html_url: String,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    owner: RawOwner,
}

impl From<RawStarred> for StarredRepo {
    fn from(raw: RawStarred) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            full_name: raw.full_name,
            description: raw
                .description
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            language: raw.language,
            stargazers_count: raw.stargazers_count,
            html_url: raw.html_url,
            updated_at: raw.updated_at.unwrap_or_default(),
            topics: raw.topics.unwrap_or_default(),
            owner: Owner {
                login: raw.owner.login,
                avatar_url: raw.owner.avatar_url,
            },
        }
    }
}

#[async_trait]
pub trait GithubSource: Send + Sync {
    async fn owned_repos(&self) -> Result<Vec<OwnedRepo>, UpstreamError>;

    async fn repo_languages(&self, repo: &OwnedRepo) -> Result<BTreeMap<String, u64>, UpstreamError>;

    async fn starred(&self) -> Result<Vec<StarredRepo>, UpstreamError>;
}

pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GithubSource for GithubClient {
    async fn owned_repos(&self) -> Result<Vec<OwnedRepo>, UpstreamError> {
        let url = format!(
            "{}/users/{}/repos?per_page={OWNED_REPOS_PER_PAGE}&type=owner",
            self.config.api_base_url, self.config.username
        );
        self.get_json(&url).await
    }

    async fn repo_languages(&self, repo: &OwnedRepo) -> Result<BTreeMap<String, u64>, UpstreamError> {
        self.get_json(&repo.languages_url).await
    }

    async fn starred(&self) -> Result<Vec<StarredRepo>, UpstreamError> {
        let url = format!(
            "{}/users/{}/starred?per_page={}",
            self.config.api_base_url, self.config.username, self.config.starred_per_page
        );
        let raw: Vec<RawStarred> = self.get_json(&url).await?;
        Ok(raw.into_iter().map(StarredRepo::from).collect())
    }
}

/// Sums language bytes over every non-fork repository. A repository whose
/// languages cannot be read is left out of the totals.
pub async fn collect_language_totals(
    source: &dyn GithubSource,
    logger: &Logger,
) -> Result<BTreeMap<String, u64>, UpstreamError> {
    let repos = source.owned_repos().await?;
    logger.debug("github.repos_fetched", json!({ "count": repos.len() }));

    let mut totals = BTreeMap::new();
    for repo in repos.iter().filter(|repo| !repo.fork) {
        match source.repo_languages(repo).await {
            Ok(languages) => {
                for (language, bytes) in languages {
                    *totals.entry(language).or_insert(0u64) += bytes;
                }
            }
            Err(error) => logger.warn(
                "github.languages_skipped",
                json!({ "repo": repo.name, "error": error.to_string() }),
            ),
        }
    }
    Ok(totals)
}

/// Rounded whole-number shares at or above `min_percentage`, largest first.
pub fn language_stats(totals: BTreeMap<String, u64>, min_percentage: u32) -> LanguageStatsBody {
    let total: u64 = totals.values().sum();
    if total == 0 {
        return LanguageStatsBody::default();
    }

    let mut shares: Vec<LanguageShare> = totals
        .iter()
        .map(|(name, bytes)| LanguageShare {
            name: name.clone(),
            level: ((*bytes as f64 / total as f64) * 100.0).round() as u32,
        })
        .filter(|share| share.level >= min_percentage)
        .collect();
    shares.sort_by(|a, b| b.level.cmp(&a.level));

    LanguageStatsBody {
        languages: totals,
        percentages: LanguagePercentages(shares),
    }
}
