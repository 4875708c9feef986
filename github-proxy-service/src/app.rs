use crate::cache::TimedCache;
use crate::config::Config;
use crate::cors::Cors;
use crate::github::{self, GithubClient, GithubSource, UpstreamError};
use crate::logger::Logger;
use crate::request_context::RequestContextManager;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use portfolio_core::github::{ErrorBody, LanguageStatsBody, StarredRepo};
use serde::Serialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};

// Headroom the router timeout keeps over the upstream deadline, so a slow
// GitHub still reaches the stale fallback.
const ROUTER_BACKSTOP_MARGIN: Duration = Duration::from_secs(5);

pub struct AppState {
    pub config: Arc<Config>,
    pub cors: Cors,
    pub source: Arc<dyn GithubSource>,
    pub languages: TimedCache<LanguageStatsBody>,
    pub starred: TimedCache<Vec<StarredRepo>>,
    pub request_context: RequestContextManager,
    pub logger: Logger,
}

pub fn build_router(config: Arc<Config>, logger: Logger) -> Result<Router> {
    let source = Arc::new(GithubClient::new(config.github.clone())?) as Arc<dyn GithubSource>;
    Ok(build_router_with_source(config, logger, source))
}

pub fn build_router_with_source(
    config: Arc<Config>,
    logger: Logger,
    source: Arc<dyn GithubSource>,
) -> Router {
    let cors = Cors::new(&config.cors_allow_origin);
    let state = Arc::new(AppState {
        languages: TimedCache::new(config.cache.languages_ttl),
        starred: TimedCache::new(config.cache.starred_ttl),
        request_context: RequestContextManager::new(logger.clone()),
        cors: cors.clone(),
        source,
        logger: logger.clone(),
        config,
    });

    let backstop = state.config.request_timeout + ROUTER_BACKSTOP_MARGIN;
    let timeout_layer = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(move |error: BoxError| {
            let logger = logger.clone();
            let cors_headers = cors.build_headers();
            async move {
                if error.is::<tower::timeout::error::Elapsed>() {
                    logger.warn("router.request_timeout", json!({ "error": error.to_string() }));
                    error_response(StatusCode::GATEWAY_TIMEOUT, "Request timed out", cors_headers)
                } else {
                    logger.error("router.unhandled_error", json!({ "error": error.to_string() }));
                    error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Unhandled proxy error",
                        cors_headers,
                    )
                }
            }
        }))
        .layer(TimeoutLayer::new(backstop));

    Router::new()
        .route(
            "/github-languages",
            get(handle_languages).options(handle_preflight),
        )
        .route(
            "/github-starred",
            get(handle_starred).options(handle_preflight),
        )
        .route("/healthz", get(handle_healthz))
        .method_not_allowed_fallback(handle_method_not_allowed)
        .fallback(handle_not_found)
        .with_state(state)
        .layer(timeout_layer)
}

async fn handle_languages(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let context = state.request_context.start(method, &uri, &headers);
    let min_percentage = state.config.min_language_percentage;
    let (status, response) = serve_cached(&state, "languages", &state.languages, || async {
        let totals = github::collect_language_totals(state.source.as_ref(), &state.logger).await?;
        Ok(github::language_stats(totals, min_percentage))
    })
    .await;
    context.complete(status.as_u16(), json!({ "route": "languages" }));
    response
}

async fn handle_starred(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let context = state.request_context.start(method, &uri, &headers);
    let (status, response) =
        serve_cached(&state, "starred", &state.starred, || state.source.starred()).await;
    context.complete(status.as_u16(), json!({ "route": "starred" }));
    response
}

/// Fresh cache first, then upstream, then whatever stale value is left. An
/// upstream call that outlives the request deadline counts as a failure.
async fn serve_cached<T, F, Fut>(
    state: &AppState,
    route: &'static str,
    cache: &TimedCache<T>,
    fetch: F,
) -> (StatusCode, Response)
where
    T: Clone + Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let cors_headers = state.cors.build_headers();
    if let Some(value) = cache.fresh().await {
        state.logger.debug("cache.hit", json!({ "route": route }));
        return (StatusCode::OK, json_response(StatusCode::OK, &value, cors_headers));
    }

    let deadline = state.config.request_timeout;
    let outcome = match tokio::time::timeout(deadline, fetch()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(UpstreamError::Timeout(deadline)),
    };

    match outcome {
        Ok(value) => {
            cache.store(value.clone()).await;
            state.logger.info("cache.refreshed", json!({ "route": route }));
            (StatusCode::OK, json_response(StatusCode::OK, &value, cors_headers))
        }
        Err(error) => {
            state.logger.warn(
                "upstream.failed",
                json!({ "route": route, "error": error.to_string() }),
            );
            match cache.stale().await {
                Some(value) => {
                    state.logger.info("cache.stale_served", json!({ "route": route }));
                    (StatusCode::OK, json_response(StatusCode::OK, &value, cors_headers))
                }
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &error.to_string(),
                        cors_headers,
                    ),
                ),
            }
        }
    }
}

async fn handle_preflight(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let context = state.request_context.start(Method::OPTIONS, &uri, &headers);
    context.complete(204, json!({ "route": "preflight" }));
    (StatusCode::NO_CONTENT, state.cors.preflight_headers()).into_response()
}

async fn handle_healthz(State(state): State<Arc<AppState>>) -> Response {
    json_response(
        StatusCode::OK,
        &json!({ "status": "ok" }),
        state.cors.build_headers(),
    )
}

async fn handle_method_not_allowed(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let context = state.request_context.start(method, &uri, &headers);
    context.complete(405, json!({ "reason": "method-not-allowed" }));
    let mut cors_headers = state.cors.build_headers();
    cors_headers.insert(header::ALLOW, HeaderValue::from_static("GET, OPTIONS"));
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed",
        cors_headers,
    )
}

async fn handle_not_found(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let context = state.request_context.start(method, &uri, &headers);
    context.complete(404, json!({ "reason": "not-found" }));
    error_response(StatusCode::NOT_FOUND, "Not found", state.cors.build_headers())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T, headers: HeaderMap) -> Response {
    (status, headers, Json(body)).into_response()
}

fn error_response(status: StatusCode, message: &str, headers: HeaderMap) -> Response {
    json_response(
        status,
        &ErrorBody {
            error: message.to_string(),
        },
        headers,
    )
}
