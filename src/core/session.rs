//! Explicit per-session context.
//!
//! A session owns its rate window and its history. Handlers receive a
//! [`SessionHandle`] from the session middleware instead of reaching for
//! ambient state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use parking_lot::Mutex;

use crate::core::history::{HistoryEntry, HistoryLog};
use crate::core::identity::UserIdentity;
use crate::core::rate_limit::{RateLimiter, RateWindow};

#[derive(Debug)]
struct Session {
    started_at: Instant,
    rate_window: Option<RateWindow>,
    history: HistoryLog,
}

/// Shared handle to one session's state.
///
/// The inner lock is never held across an await point.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    identity: UserIdentity,
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            inner: Arc::new(Mutex::new(Session {
                started_at: Instant::now(),
                rate_window: None,
                history: HistoryLog::new(),
            })),
        }
    }

    pub fn identity(&self) -> UserIdentity {
        self.identity
    }

    pub fn age(&self) -> Duration {
        self.inner.lock().started_at.elapsed()
    }

    pub fn check_and_consume(&self, limiter: &RateLimiter) -> bool {
        limiter.check_and_consume(&mut self.inner.lock().rate_window)
    }

    pub fn record(&self, entry: HistoryEntry) {
        self.inner.lock().history.append(entry);
    }

    pub fn remove_history(&self, index: usize) -> Option<HistoryEntry> {
        self.inner.lock().history.remove_at(index)
    }

    pub fn history_entry(&self, index: usize) -> Option<HistoryEntry> {
        self.inner.lock().history.get(index).cloned()
    }

    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.inner.lock().history.iter().cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.inner.lock().history.len()
    }
}

/// All live sessions, evicted after a period of inactivity or when the
/// registry is over capacity.
pub struct SessionRegistry {
    sessions: Cache<UserIdentity, SessionHandle>,
    limiter: RateLimiter,
}

impl SessionRegistry {
    pub fn new(capacity: u64, idle_timeout: Duration, limiter: RateLimiter) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(idle_timeout)
                .build(),
            limiter,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub async fn get_or_create(&self, identity: UserIdentity) -> SessionHandle {
        self.sessions
            .get_with(identity, async move {
                tracing::info!(user_id = %identity, "Session started");
                SessionHandle::new(identity)
            })
            .await
    }

    /// Approximate number of live sessions.
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub async fn get(&self, identity: &UserIdentity) -> Option<SessionHandle> {
        self.sessions.get(identity).await
    }

    /// Discard the session, its history and its rate window.
    pub async fn end(&self, identity: &UserIdentity) -> bool {
        let existed = self.sessions.remove(identity).await.is_some();
        if existed {
            tracing::info!(user_id = %identity, "Session ended");
        }
        existed
    }

    /// Fixed-window admission for `identity`, creating its session if needed.
    pub async fn check_and_consume(&self, identity: UserIdentity) -> bool {
        self.get_or_create(identity)
            .await
            .check_and_consume(&self.limiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::SynthesisRequest;
    use bytes::Bytes;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(
            10_000,
            Duration::from_secs(3600),
            RateLimiter::new(10, Duration::from_secs(60)),
        )
    }

    fn entry(text: &str) -> HistoryEntry {
        let request = SynthesisRequest::new(text, "en-US-Standard-A", "en-US", 1.0);
        HistoryEntry::new(&request, "English (United States)", "en-US-Standard-A", Bytes::new())
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let registry = registry();
        let id = UserIdentity::generate();

        let a = registry.get_or_create(id).await;
        a.record(entry("hello"));
        let b = registry.get_or_create(id).await;
        assert_eq!(b.history_len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_is_per_identity() {
        let registry = registry();
        let a = UserIdentity::generate();
        let b = UserIdentity::generate();

        for _ in 0..10 {
            assert!(registry.check_and_consume(a).await);
        }
        assert!(!registry.check_and_consume(a).await);
        assert!(registry.check_and_consume(b).await);
    }

    #[tokio::test]
    async fn test_end_discards_state() {
        let registry = registry();
        let id = UserIdentity::generate();

        let session = registry.get_or_create(id).await;
        session.record(entry("hello"));
        for _ in 0..10 {
            assert!(session.check_and_consume(registry.limiter()));
        }

        assert!(registry.end(&id).await);
        assert!(registry.get(&id).await.is_none());

        let fresh = registry.get_or_create(id).await;
        assert_eq!(fresh.history_len(), 0);
        assert!(fresh.check_and_consume(registry.limiter()));
        assert!(!registry.end(&UserIdentity::generate()).await);
    }

    #[tokio::test]
    async fn test_capacity_bounds_live_sessions() {
        let registry = SessionRegistry::new(
            2,
            Duration::from_secs(3600),
            RateLimiter::new(10, Duration::from_secs(60)),
        );

        for _ in 0..10 {
            registry.get_or_create(UserIdentity::generate()).await;
        }
        registry.sessions.run_pending_tasks().await;

        assert!(registry.session_count() <= 2);
    }

    #[tokio::test]
    async fn test_history_operations_through_handle() {
        let registry = registry();
        let session = registry.get_or_create(UserIdentity::generate()).await;

        session.record(entry("one"));
        session.record(entry("two"));
        assert_eq!(session.history_entry(0).unwrap().text, "two");

        let removed = session.remove_history(0).unwrap();
        assert_eq!(removed.text, "two");
        let snapshot = session.history_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].text, "one");
        assert!(session.remove_history(5).is_none());
    }
}
