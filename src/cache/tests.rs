//! Cache Module Tests
//!
//! ## Test Scopes
//! - **Lifecycle**: `Empty → Loading → Ready | Failed` transitions.
//! - **Reads**: empty reads before publish, full snapshot after.
//! - **Publication**: concurrent readers never observe a partial snapshot.

#[cfg(test)]
mod tests {
    use crate::cache::{CacheState, MessageCache};
    use crate::search::types::Message;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn messages(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| Message {
                id: format!("id-{}", i),
                user_id: "u1".to_string(),
                user_name: "Alice".to_string(),
                timestamp: "2024-01-01T00:00:00".to_string(),
                message: format!("message {}", i),
            })
            .collect()
    }

    // ============================================================
    // LIFECYCLE TESTS
    // ============================================================

    #[test]
    fn test_new_cache_is_empty_and_not_ready() {
        let cache = MessageCache::new();

        assert!(!cache.is_ready());
        assert!(cache.read().is_empty());
        assert!(cache.snapshot().is_none());
        assert_eq!(cache.len(), 0);
        assert!(matches!(cache.state(), CacheState::Empty));
    }

    #[test]
    fn test_loading_is_not_ready() {
        let cache = MessageCache::new();

        cache.begin_loading();

        assert!(!cache.is_ready());
        assert!(cache.read().is_empty());
        assert!(matches!(cache.state(), CacheState::Loading));
    }

    #[test]
    fn test_publish_makes_cache_ready() {
        let cache = MessageCache::new();
        cache.begin_loading();

        cache.publish(messages(3));

        assert!(cache.is_ready());
        assert_eq!(cache.len(), 3);
        let snapshot = cache.read();
        assert_eq!(snapshot[0].id, "id-0");
        assert_eq!(snapshot[2].id, "id-2");
    }

    #[test]
    fn test_publish_empty_corpus_is_ready() {
        let cache = MessageCache::new();

        cache.publish(Vec::new());

        // Ready even though there is nothing in it
        assert!(cache.is_ready());
        assert!(cache.is_empty());
        assert!(cache.snapshot().is_some());
    }

    #[test]
    fn test_mark_failed_keeps_cache_unready() {
        let cache = MessageCache::new();
        cache.begin_loading();

        cache.mark_failed("upstream returned HTTP 502");

        assert!(!cache.is_ready());
        assert!(cache.read().is_empty());
        match cache.state() {
            CacheState::Failed(reason) => assert!(reason.contains("502")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_begin_loading_does_not_discard_ready_snapshot() {
        let cache = MessageCache::with_messages(messages(2));

        cache.begin_loading();

        assert!(cache.is_ready());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_snapshot_survives_reader_holding_it() {
        let cache = MessageCache::with_messages(messages(5));

        let held = cache.read();
        let again = cache.read();

        // Both readers share the same allocation
        assert!(Arc::ptr_eq(&held, &again));
        assert_eq!(held.len(), 5);
    }

    // ============================================================
    // PUBLICATION TESTS
    // ============================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_see_nothing_or_everything() {
        // ARRANGE
        const TOTAL: usize = 5_000;
        let cache = MessageCache::new();
        cache.begin_loading();
        let done = Arc::new(AtomicBool::new(false));

        let mut readers = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let done = done.clone();
            readers.push(tokio::spawn(async move {
                let mut observed = Vec::new();
                while !done.load(Ordering::SeqCst) {
                    observed.push(cache.read().len());
                    tokio::task::yield_now().await;
                }
                observed.push(cache.read().len());
                observed
            }));
        }

        // ACT: publish while readers are sampling
        tokio::task::yield_now().await;
        cache.publish(messages(TOTAL));
        done.store(true, Ordering::SeqCst);

        // ASSERT
        for reader in readers {
            let observed = reader.await.unwrap();
            assert!(
                observed.iter().all(|&n| n == 0 || n == TOTAL),
                "reader observed a partial snapshot"
            );
            assert_eq!(*observed.last().unwrap(), TOTAL);
        }
    }
}
