use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::traits::ResourceReader;
use crate::domain::{ReadError, ResourceId};

/// In-memory store with optional per-resource latency
///
/// Tracks how many reads are in flight at once, which makes the scheduling
/// of a batch observable: a sequential batch never exceeds one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: HashMap<ResourceId, String>,
    delays: HashMap<ResourceId, Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    reads_started: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource (fluent interface)
    pub fn with_resource(mut self, id: impl Into<ResourceId>, content: impl Into<String>) -> Self {
        self.resources.insert(id.into(), content.into());
        self
    }

    /// Make reads of `id` take `delay` before settling
    pub fn with_delay(mut self, id: impl Into<ResourceId>, delay: Duration) -> Self {
        self.delays.insert(id.into(), delay);
        self
    }

    /// Highest number of reads observed in flight at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Total number of reads started, including failed ones
    pub fn reads_started(&self) -> usize {
        self.reads_started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceReader for MemoryStore {
    async fn read(&self, id: &ResourceId) -> Result<String, ReadError> {
        self.reads_started.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        } else {
            // Still a suspension point, like a real read
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.resources
            .get(id)
            .cloned()
            .ok_or_else(|| ReadError::not_found(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_known_resource() {
        let store = MemoryStore::new().with_resource("a.txt", "alpha");

        assert_eq!(store.read(&ResourceId::new("a.txt")).await.unwrap(), "alpha");
        assert_eq!(store.reads_started(), 1);
        assert_eq!(store.peak_in_flight(), 1);
    }

    #[tokio::test]
    async fn unknown_resource_is_not_found() {
        let store = MemoryStore::new();

        let err = store.read(&ResourceId::new("nope.txt")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.reads_started(), 1);
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let store = std::sync::Arc::new(MemoryStore::new().with_resource("a.txt", "alpha"));
        let shared = store.clone();

        assert_eq!(shared.read(&ResourceId::new("a.txt")).await.unwrap(), "alpha");
        assert_eq!(store.reads_started(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_reads_raise_peak() {
        let store = MemoryStore::new()
            .with_resource("a.txt", "alpha")
            .with_resource("b.txt", "beta")
            .with_delay("a.txt", Duration::from_millis(10))
            .with_delay("b.txt", Duration::from_millis(10));

        let a = ResourceId::new("a.txt");
        let b = ResourceId::new("b.txt");
        let (ra, rb) = tokio::join!(store.read(&a), store.read(&b));

        assert_eq!(ra.unwrap(), "alpha");
        assert_eq!(rb.unwrap(), "beta");
        assert_eq!(store.peak_in_flight(), 2);
    }
}
