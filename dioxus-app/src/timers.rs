#[cfg(not(target_arch = "wasm32"))]
use portfolio_core::VirtualScheduler;
use std::time::Duration;

/// `setTimeout` through gloo. A handle that fired already is dropped without
/// effect, so the runner may release it from inside its own callback.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WebScheduler;

#[cfg(target_arch = "wasm32")]
impl portfolio_core::Scheduler for WebScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        drop(handle.cancel());
    }
}

#[cfg(target_arch = "wasm32")]
pub type AppScheduler = WebScheduler;

// Off the web nothing advances the clock, so every animation holds its first frame.
#[cfg(not(target_arch = "wasm32"))]
pub type AppScheduler = VirtualScheduler;

pub fn app_scheduler() -> AppScheduler {
    AppScheduler::default()
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Seed for jittered reveals and flicker bursts.
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

/// Resolves after `delay`. Off the web it resolves immediately.
pub async fn sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _delay = delay;
}
