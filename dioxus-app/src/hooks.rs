use dioxus::prelude::*;
use portfolio_core::fetch::FetchState;
use portfolio_core::github::{decode_languages, decode_starred, LanguageShare, StarredRepo};
use portfolio_core::FetchError;

use crate::config::RuntimeConfig;

type Decoder<T> = fn(u16, &str) -> Result<T, FetchError>;

pub struct FetchHandle<T: 'static> {
    state: Signal<FetchState<T>>,
    nonce: Signal<u64>,
}

impl<T: 'static> Clone for FetchHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for FetchHandle<T> {}

impl<T: 'static> FetchHandle<T> {
    pub fn state(&self) -> Signal<FetchState<T>> {
        self.state
    }

    pub fn refetch(&mut self) {
        *self.nonce.write() += 1;
    }
}

pub fn use_language_stats() -> FetchHandle<Vec<LanguageShare>> {
    use_fetch("github-languages", decode_languages)
}

pub fn use_starred_repos() -> FetchHandle<Vec<StarredRepo>> {
    use_fetch("github-starred", decode_starred)
}

/// Fetch on mount, again on every `refetch`. Whatever settles last is shown.
fn use_fetch<T: Default + 'static>(name: &'static str, decode: Decoder<T>) -> FetchHandle<T> {
    let config = use_context::<RuntimeConfig>();
    let url = config.endpoint(name);
    let mut state = use_signal(FetchState::<T>::new);
    let nonce = use_signal(|| 0u64);

    use_effect(move || {
        let attempt = nonce();
        let url = url.clone();
        state.write().begin();
        tracing::debug!("fetch: {name} attempt {attempt}");
        spawn(async move {
            let result = request(&url, decode).await;
            if let Err(err) = &result {
                tracing::warn!("fetch: {name} failed: {err}");
            }
            state.write().settle(result);
        });
    });

    FetchHandle { state, nonce }
}

#[cfg(target_arch = "wasm32")]
async fn request<T>(url: &str, decode: Decoder<T>) -> Result<T, FetchError> {
    let response = gloo_net::http::Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?;
    decode(status, &body)
}

#[cfg(not(target_arch = "wasm32"))]
async fn request<T>(url: &str, _decode: Decoder<T>) -> Result<T, FetchError> {
    Err(FetchError::Transport(format!("{url}: no browser fetch available")))
}
