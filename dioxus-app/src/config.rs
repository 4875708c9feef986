use dioxus::prelude::*;
use serde::Deserialize;

const DEFAULT_GITHUB_API_BASE_URL: &str = "/api/github";

/// Deploy-time settings. Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub github_api_base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            github_api_base_url: DEFAULT_GITHUB_API_BASE_URL.to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.github_api_base_url.trim_end_matches('/'))
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn parse(body: &str) -> Result<Self, String> {
        serde_json::from_str(body).map_err(|err| format!("config decode failed: {err}"))
    }
}

pub fn use_runtime_config() -> Resource<Result<RuntimeConfig, String>> {
    use_resource(|| async move { load_runtime_config().await })
}

#[cfg(target_arch = "wasm32")]
const CONFIG_SOURCES: [&str; 2] = ["/config.json", "/assets/config.json"];

#[cfg(target_arch = "wasm32")]
async fn load_runtime_config() -> Result<RuntimeConfig, String> {
    let mut last_error = String::from("config fetch failed: no source");
    for source in CONFIG_SOURCES {
        match read_source(source).await {
            Ok(config) => return Ok(config),
            Err(err) => {
                tracing::debug!("config: {source} unusable: {err}");
                last_error = err;
            }
        }
    }
    Err(last_error)
}

#[cfg(target_arch = "wasm32")]
async fn read_source(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: {path} returned {}", response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    RuntimeConfig::parse(&body)
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_runtime_config() -> Result<RuntimeConfig, String> {
    match std::env::var("GITHUB_API_BASE_URL") {
        Ok(github_api_base_url) => Ok(RuntimeConfig { github_api_base_url }),
        Err(_) => Ok(RuntimeConfig::default()),
    }
}
