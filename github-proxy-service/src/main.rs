use anyhow::Result;
use github_proxy_service::build_router;
use github_proxy_service::config::Config;
use github_proxy_service::logger::{Logger, log_error};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    let logger = Logger::new("github-proxy-service");
    let config = Arc::new(Config::load(&logger)?);

    if matches!(std::env::args().nth(1).as_deref(), Some("check-config")) {
        logger.info(
            "config.check_passed",
            json!({
                "port": config.port,
                "githubUsername": config.github.username,
                "githubApiBaseUrl": config.github.api_base_url,
                "authenticated": config.github.token.is_some(),
                "languagesTtlSeconds": config.cache.languages_ttl.as_secs(),
                "starredTtlSeconds": config.cache.starred_ttl.as_secs(),
                "minLanguagePercentage": config.min_language_percentage,
            }),
        );
        return Ok(());
    }

    let router = build_router(config.clone(), logger.clone())?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    logger.info(
        "server.started",
        json!({
            "port": config.port,
            "githubUsername": config.github.username,
        }),
    );

    if let Err(error) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(logger.clone()))
        .await
    {
        log_error(&logger, "server.failed", &error);
        return Err(error.into());
    }

    logger.info("server.stopped", json!({}));
    Ok(())
}

async fn shutdown_signal(logger: Logger) {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = {
        let logger = logger.clone();
        async move {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(error) => {
                    logger.warn("shutdown.sigterm_unavailable", json!({ "error": error.to_string() }));
                    std::future::pending::<()>().await;
                }
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            logger.info("shutdown.ctrl_c", json!({"message": "Received Ctrl+C"}));
        }
        _ = terminate => {
            logger.info("shutdown.terminate", json!({"message": "Received SIGTERM"}));
        }
    }
}
