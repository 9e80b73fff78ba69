//! Guard against stale results when queries overlap
//!
//! Every query takes a [`Ticket`] before it starts. When it finishes it may
//! publish its view only if no newer query has begun in the meantime, so a
//! slow lookup for an old artist name never replaces the current one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;

/// Position of a query in the session's request order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct ViewSession<T> {
    latest: AtomicU64,
    published: RwLock<Option<(Ticket, T)>>,
}

impl<T> Default for ViewSession<T> {
    fn default() -> Self {
        Self {
            latest: AtomicU64::new(0),
            published: RwLock::new(None),
        }
    }
}

impl<T: Clone> ViewSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding every earlier ticket
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish a finished view; returns false when the ticket was superseded
    pub fn publish(&self, ticket: Ticket, view: T) -> bool {
        let mut published = self.published.write().unwrap_or_else(|e| e.into_inner());

        let newer_published = published
            .as_ref()
            .is_some_and(|(current, _)| *current > ticket);
        if !self.is_current(ticket) || newer_published {
            debug!(ticket = ticket.0, "Dropping superseded result");
            return false;
        }

        *published = Some((ticket, view));
        true
    }

    /// The most recently published view
    pub fn current(&self) -> Option<T> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(_, view)| view.clone())
    }

    /// Run one query under a fresh ticket and publish its result.
    ///
    /// Returns `None` when a newer query began while this one ran.
    pub async fn run<F, Fut>(&self, query: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.begin();
        let view = query().await;

        self.publish(ticket, view.clone()).then_some(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_tickets_increase() {
        let session = ViewSession::<String>::new();
        let first = session.begin();
        let second = session.begin();

        assert!(second > first);
        assert!(session.is_current(second));
        assert!(!session.is_current(first));
    }

    #[test]
    fn test_stale_ticket_cannot_publish() {
        let session = ViewSession::new();
        let old = session.begin();
        let new = session.begin();

        assert!(session.publish(new, "Taylor Swift"));
        assert!(!session.publish(old, "Coldplay"));
        assert_eq!(session.current(), Some("Taylor Swift"));
    }

    #[test]
    fn test_superseded_query_publishes_nothing() {
        let session = ViewSession::new();
        let old = session.begin();
        let _new = session.begin();

        assert!(!session.publish(old, "Coldplay"));
        assert_eq!(session.current(), None);
    }

    #[tokio::test]
    async fn test_slow_query_is_dropped() {
        let session = Arc::new(ViewSession::new());

        let slow = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .run(|| async {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        "Coldplay"
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = session.run(|| async { "Daft Punk" }).await;

        assert_eq!(fast, Some("Daft Punk"));
        assert_eq!(slow.await.unwrap(), None);
        assert_eq!(session.current(), Some("Daft Punk"));
    }
}
