/// Short-lived news cache.
///
/// One process-wide store keyed by category. Entries are valid for five
/// minutes; an expired entry behaves exactly like an absent one. All
/// access goes through the single-threaded event loop (or a one-shot
/// command), so the lock is never contended for long; two instances
/// writing the same category simply last-write-win.
use cached::{Cached, TimedSizedCache};
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use crate::types::{NewsCategory, NewsItem};

/// Validity window for a cached category.
pub const NEWS_CACHE_LIFESPAN_SECS: u64 = 300;

/// There are only four categories; the bound is headroom, not policy.
const NEWS_CACHE_SIZE: usize = 8;

static NEWS_CACHE: Lazy<Mutex<TimedSizedCache<NewsCategory, Vec<NewsItem>>>> = Lazy::new(|| {
    Mutex::new(TimedSizedCache::with_size_and_lifespan(
        NEWS_CACHE_SIZE,
        NEWS_CACHE_LIFESPAN_SECS,
    ))
});

/// Unexpired entry for the category, if any.
pub async fn lookup(category: NewsCategory) -> Option<Vec<NewsItem>> {
    NEWS_CACHE.lock().await.cache_get(&category).cloned()
}

/// Store a fresh live result, replacing whatever was there.
pub async fn store(category: NewsCategory, items: Vec<NewsItem>) {
    NEWS_CACHE.lock().await.cache_set(category, items);
}

/// Drop the entry for a category so the next load goes live.
pub async fn invalidate(category: NewsCategory) {
    NEWS_CACHE.lock().await.cache_remove(&category);
}

/// Serializes tests that touch the process-wide cache.
#[cfg(test)]
pub static TEST_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(test)]
pub async fn clear() {
    NEWS_CACHE.lock().await.cache_clear();
}

#[cfg(test)]
pub async fn len() -> usize {
    NEWS_CACHE.lock().await.cache_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_store_then_lookup() {
        let _guard = TEST_MUTEX.lock().await;
        let items = fixtures::mock_news(NewsCategory::Technology);
        store(NewsCategory::Technology, items.clone()).await;
        assert_eq!(lookup(NewsCategory::Technology).await, Some(items));
    }

    #[tokio::test]
    async fn test_lookup_other_category_misses() {
        let _guard = TEST_MUTEX.lock().await;
        clear().await;
        store(
            NewsCategory::Technology,
            fixtures::mock_news(NewsCategory::Technology),
        )
        .await;
        assert_eq!(lookup(NewsCategory::Sports).await, None);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let _guard = TEST_MUTEX.lock().await;
        let items = fixtures::mock_news(NewsCategory::Science);
        store(NewsCategory::Science, items).await;
        invalidate(NewsCategory::Science).await;
        assert_eq!(lookup(NewsCategory::Science).await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_behaves_like_absent() {
        // Zero lifespan: everything is expired the moment it is stored.
        let mut cache: TimedSizedCache<NewsCategory, Vec<NewsItem>> =
            TimedSizedCache::with_size_and_lifespan(2, 0);
        cache.cache_set(
            NewsCategory::Business,
            fixtures::mock_news(NewsCategory::Business),
        );
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(cache.cache_get(&NewsCategory::Business).is_none());
    }

    #[tokio::test]
    #[ignore] // Shared cache state - run individually
    async fn test_clear_empties_cache() {
        let _guard = TEST_MUTEX.lock().await;
        store(
            NewsCategory::Business,
            fixtures::mock_news(NewsCategory::Business),
        )
        .await;
        assert!(len().await > 0);
        clear().await;
        assert_eq!(len().await, 0);
    }
}
