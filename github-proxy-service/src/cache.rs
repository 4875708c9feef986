use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Holds the last good upstream result. Expired values stay readable as a
/// fallback until a newer one replaces them.
pub struct TimedCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

impl<T: Clone> TimedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub async fn fresh(&self) -> Option<T> {
        self.fresh_at(Instant::now()).await
    }

    pub async fn fresh_at(&self, now: Instant) -> Option<T> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn stale(&self) -> Option<T> {
        let slot = self.slot.lock().await;
        slot.as_ref().map(|entry| entry.value.clone())
    }

    pub async fn store(&self, value: T) {
        self.store_at(value, Instant::now()).await;
    }

    pub async fn store_at(&self, value: T, now: Instant) {
        let mut slot = self.slot.lock().await;
        *slot = Some(Entry {
            value,
            stored_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn empty_cache_has_nothing() {
        let cache = TimedCache::<u32>::new(Duration::from_secs(5));
        assert_eq!(cache.fresh().await, None);
        assert_eq!(cache.stale().await, None);
    }

    #[tokio::test]
    async fn expires_into_stale() {
        let cache = TimedCache::new(Duration::from_secs(5));
        let start = Instant::now();
        cache.store_at(7u32, start).await;

        assert_eq!(cache.fresh_at(start + Duration::from_secs(4)).await, Some(7));
        assert_eq!(cache.fresh_at(start + Duration::from_secs(5)).await, None);
        assert_eq!(cache.stale().await, Some(7));
    }

    #[tokio::test]
    async fn store_replaces_the_previous_value() {
        let cache = TimedCache::new(Duration::from_secs(5));
        cache.store(1u32).await;
        cache.store(2u32).await;
        assert_eq!(cache.fresh().await, Some(2));
    }
}
