use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::routing::get;
use github_proxy_service::build_router_with_source;
use github_proxy_service::config::Config;
use github_proxy_service::github::{GithubSource, OwnedRepo, UpstreamError};
use github_proxy_service::logger::{LogLevel, Logger};
use http::Response;
use http_body_util::BodyExt;
use portfolio_core::github::{Owner, StarredRepo};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

struct MockGithub {
    repos: Vec<OwnedRepo>,
    languages: HashMap<String, BTreeMap<String, u64>>,
    starred: Vec<StarredRepo>,
    failing: AtomicBool,
    slow: AtomicBool,
    repo_list_calls: AtomicUsize,
    starred_calls: AtomicUsize,
}

impl MockGithub {
    fn new() -> Self {
        Self {
            repos: vec![
                repo("portfolio", false),
                repo("scripts", false),
                repo("forked-ml", true),
                repo("archived", false),
            ],
            languages: HashMap::from([
                ("portfolio".to_string(), bytes(&[("Rust", 500), ("TypeScript", 385)])),
                ("scripts".to_string(), bytes(&[("Rust", 100), ("Shell", 10)])),
                ("forked-ml".to_string(), bytes(&[("Python", 100_000)])),
            ]),
            starred: vec![StarredRepo {
                id: 1,
                name: "axum".to_string(),
                full_name: "tokio-rs/axum".to_string(),
                description: "Ergonomic and modular web framework".to_string(),
                language: Some("Rust".to_string()),
                stargazers_count: 20_000,
                html_url: "https://github.com/tokio-rs/axum".to_string(),
                updated_at: "2026-09-30T12:00:00Z".to_string(),
                topics: vec!["http".to_string()],
                owner: Owner {
                    login: "tokio-rs".to_string(),
                    avatar_url: "https://avatars.test/tokio-rs.png".to_string(),
                },
            }],
            failing: AtomicBool::new(false),
            slow: AtomicBool::new(false),
            repo_list_calls: AtomicUsize::new(0),
            starred_calls: AtomicUsize::new(0),
        }
    }

    fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn stall(&self) {
        self.slow.store(true, Ordering::SeqCst);
    }

    async fn wait_if_stalled(&self) {
        if self.slow.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }
}

#[async_trait]
impl GithubSource for MockGithub {
    async fn owned_repos(&self) -> Result<Vec<OwnedRepo>, UpstreamError> {
        self.repo_list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_stalled().await;
        if self.failing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status(502));
        }
        Ok(self.repos.clone())
    }

    async fn repo_languages(&self, repo: &OwnedRepo) -> Result<BTreeMap<String, u64>, UpstreamError> {
        self.languages
            .get(&repo.name)
            .cloned()
            .ok_or(UpstreamError::Status(404))
    }

    async fn starred(&self) -> Result<Vec<StarredRepo>, UpstreamError> {
        self.starred_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_stalled().await;
        if self.failing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status(403));
        }
        Ok(self.starred.clone())
    }
}

fn repo(name: &str, fork: bool) -> OwnedRepo {
    OwnedRepo {
        name: name.to_string(),
        fork,
        languages_url: format!("https://api.github.test/repos/samranjithpaul/{name}/languages"),
    }
}

fn bytes(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs
        .iter()
        .map(|(name, count)| (name.to_string(), *count))
        .collect()
}

fn quiet_logger() -> Logger {
    Logger::with_level("github-proxy-test", "test-host", LogLevel::Error)
}

fn config_with(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned(), &quiet_logger()).expect("config")
}

fn router_with(config: Config, source: Arc<MockGithub>) -> Router {
    build_router_with_source(Arc::new(config), quiet_logger(), source)
}

async fn send(router: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Origin", "http://portfolio.test")
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], ALLOW_HEADERS);
}

#[tokio::test]
async fn languages_skip_forks_and_failures_then_serve_from_cache() {
    let source = Arc::new(MockGithub::new());
    let router = router_with(config_with(&[]), source.clone());

    let first = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_cors(first.headers());
    let first_body = body_text(first).await;
    assert_eq!(
        first_body,
        r#"{"languages":{"Rust":600,"Shell":10,"TypeScript":385},"percentages":{"Rust":60,"TypeScript":39}}"#
    );

    let second = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(body_text(second).await, first_body);
    assert_eq!(source.repo_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn threshold_is_configurable() {
    let source = Arc::new(MockGithub::new());
    let router = router_with(config_with(&[("MIN_LANGUAGE_PERCENTAGE", "1")]), source);

    let body: Value =
        serde_json::from_str(&body_text(send(&router, Method::GET, "/github-languages").await).await)
            .unwrap();
    assert_eq!(body["percentages"], json!({ "Rust": 60, "TypeScript": 39, "Shell": 1 }));
}

#[tokio::test]
async fn stale_payload_is_served_when_upstream_fails() {
    let source = Arc::new(MockGithub::new());
    let mut config = config_with(&[]);
    config.cache.languages_ttl = Duration::ZERO;
    config.cache.starred_ttl = Duration::ZERO;
    let router = router_with(config, source.clone());

    let languages = body_text(send(&router, Method::GET, "/github-languages").await).await;
    let starred = body_text(send(&router, Method::GET, "/github-starred").await).await;

    source.fail();

    let stale_languages = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(stale_languages.status(), StatusCode::OK);
    assert_eq!(body_text(stale_languages).await, languages);

    let stale_starred = send(&router, Method::GET, "/github-starred").await;
    assert_eq!(stale_starred.status(), StatusCode::OK);
    assert_eq!(body_text(stale_starred).await, starred);

    assert_eq!(source.repo_list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(source.starred_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failure_without_cache_is_a_500_error_payload() {
    let source = Arc::new(MockGithub::new());
    source.fail();
    let router = router_with(config_with(&[]), source);

    let languages = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(languages.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(languages.headers());
    assert_eq!(
        body_text(languages).await,
        r#"{"error":"GitHub API returned 502"}"#
    );

    let starred = send(&router, Method::GET, "/github-starred").await;
    assert_eq!(starred.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(starred).await, r#"{"error":"GitHub API returned 403"}"#);
}

#[tokio::test]
async fn slow_upstream_falls_back_to_the_stale_payload() {
    let source = Arc::new(MockGithub::new());
    let mut config = config_with(&[("REQUEST_TIMEOUT_MS", "200")]);
    config.cache.languages_ttl = Duration::ZERO;
    config.cache.starred_ttl = Duration::ZERO;
    let router = router_with(config, source.clone());

    let languages = body_text(send(&router, Method::GET, "/github-languages").await).await;
    let starred = body_text(send(&router, Method::GET, "/github-starred").await).await;

    source.stall();

    let stale_languages = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(stale_languages.status(), StatusCode::OK);
    assert_cors(stale_languages.headers());
    assert_eq!(body_text(stale_languages).await, languages);

    let stale_starred = send(&router, Method::GET, "/github-starred").await;
    assert_eq!(stale_starred.status(), StatusCode::OK);
    assert_eq!(body_text(stale_starred).await, starred);
}

#[tokio::test]
async fn slow_upstream_without_cache_is_a_500_error_payload() {
    let source = Arc::new(MockGithub::new());
    source.stall();
    let router = router_with(config_with(&[("REQUEST_TIMEOUT_MS", "200")]), source);

    let response = send(&router, Method::GET, "/github-starred").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(response.headers());
    assert_eq!(
        body_text(response).await,
        r#"{"error":"GitHub did not respond within 200ms"}"#
    );
}

#[tokio::test]
async fn preflight_health_and_unknown_routes_carry_cors() {
    let router = router_with(config_with(&[]), Arc::new(MockGithub::new()));

    let preflight = send(&router, Method::OPTIONS, "/github-starred").await;
    assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
    assert_cors(preflight.headers());
    assert_eq!(preflight.headers()["access-control-allow-methods"], "GET, OPTIONS");

    let health = send(&router, Method::GET, "/healthz").await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_text(health).await, r#"{"status":"ok"}"#);

    let missing = send(&router, Method::GET, "/github-followers").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_cors(missing.headers());

    let wrong_method = send(&router, Method::POST, "/github-languages").await;
    assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(wrong_method.headers());
}

#[derive(Clone, Default)]
struct SeenHeaders(Arc<Mutex<Vec<HeaderMap>>>);

async fn spawn_fake_github(seen: SeenHeaders) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let languages_url = format!("{base}/repos/samranjithpaul/site/languages");

    let starred = {
        let seen = seen.clone();
        move |headers: HeaderMap| async move {
            seen.0.lock().unwrap().push(headers);
            axum::Json(json!([{
                "id": 42,
                "name": "ratatui",
                "full_name": "ratatui/ratatui",
                "description": null,
                "language": "Rust",
                "stargazers_count": 12000,
                "html_url": "https://github.com/ratatui/ratatui",
                "updated_at": "2026-10-01T00:00:00Z",
                "owner": { "login": "ratatui", "avatar_url": "https://avatars.test/ratatui.png" },
                "watchers": 12000
            }]))
        }
    };
    let repos = move || async move {
        axum::Json(json!([
            { "name": "site", "fork": false, "languages_url": languages_url },
        ]))
    };
    let languages = || async { axum::Json(json!({ "Rust": 3, "CSS": 1 })) };

    let upstream = Router::new()
        .route("/users/{user}/starred", get(starred))
        .route("/users/{user}/repos", get(repos))
        .route("/repos/{owner}/{repo}/languages", get(languages));
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.ok();
    });
    base
}

#[tokio::test]
async fn github_client_maps_starred_repos_and_sends_credentials() {
    let seen = SeenHeaders::default();
    let base = spawn_fake_github(seen.clone()).await;
    let config = config_with(&[("GITHUB_API_BASE_URL", base.as_str()), ("GITHUB_TOKEN", "test-token")]);
    let router = github_proxy_service::build_router(Arc::new(config), quiet_logger()).unwrap();

    let response = send(&router, Method::GET, "/github-starred").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        body,
        json!([{
            "id": 42,
            "name": "ratatui",
            "full_name": "ratatui/ratatui",
            "description": "No description available",
            "language": "Rust",
            "stargazers_count": 12000,
            "html_url": "https://github.com/ratatui/ratatui",
            "updated_at": "2026-10-01T00:00:00Z",
            "topics": [],
            "owner": { "login": "ratatui", "avatar_url": "https://avatars.test/ratatui.png" }
        }])
    );

    let headers = seen.0.lock().unwrap().pop().unwrap();
    assert_eq!(headers["accept"], "application/vnd.github.v3+json");
    assert_eq!(headers["authorization"], "Bearer test-token");
    assert!(headers.contains_key("user-agent"));

    let languages = send(&router, Method::GET, "/github-languages").await;
    assert_eq!(
        body_text(languages).await,
        r#"{"languages":{"CSS":1,"Rust":3},"percentages":{"Rust":75,"CSS":25}}"#
    );
}
