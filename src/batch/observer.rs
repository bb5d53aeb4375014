use std::sync::{Arc, Mutex};

use crate::domain::{ReadError, ResourceId};

/// Receives per-item callbacks while a batch runs
///
/// Callbacks fire from the task driving the batch, one at a time. In a
/// parallel batch they arrive in completion order.
pub trait BatchObserver: Send {
    /// A resource was read successfully
    fn on_content(&mut self, id: &ResourceId, content: &str);

    /// A failure the policy chose to surface
    fn on_failure(&mut self, _error: &ReadError) {}

    /// The batch has settled; fires exactly once
    fn on_done(&mut self) {}
}

impl<O: BatchObserver + ?Sized> BatchObserver for &mut O {
    fn on_content(&mut self, id: &ResourceId, content: &str) {
        (**self).on_content(id, content);
    }

    fn on_failure(&mut self, error: &ReadError) {
        (**self).on_failure(error);
    }

    fn on_done(&mut self) {
        (**self).on_done();
    }
}

impl<O: BatchObserver + ?Sized> BatchObserver for Box<O> {
    fn on_content(&mut self, id: &ResourceId, content: &str) {
        (**self).on_content(id, content);
    }

    fn on_failure(&mut self, error: &ReadError) {
        (**self).on_failure(error);
    }

    fn on_done(&mut self) {
        (**self).on_done();
    }
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_content(&mut self, _id: &ResourceId, _content: &str) {}
}

/// Event captured by a [`Recorder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Content { id: ResourceId, content: String },
    Failure(ReadError),
    Done,
}

/// Observer that records every callback
///
/// Clones share the same log, so a caller can keep one handle while the
/// batch owns another.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<BatchEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: BatchEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    pub fn events(&self) -> Vec<BatchEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Ids of successful reads in callback order
    pub fn content_ids(&self) -> Vec<ResourceId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BatchEvent::Content { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn contents(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BatchEvent::Content { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<ReadError> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BatchEvent::Failure(error) => Some(error),
                _ => None,
            })
            .collect()
    }

    pub fn done_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == BatchEvent::Done)
            .count()
    }
}

impl BatchObserver for Recorder {
    fn on_content(&mut self, id: &ResourceId, content: &str) {
        self.push(BatchEvent::Content {
            id: id.clone(),
            content: content.to_string(),
        });
    }

    fn on_failure(&mut self, error: &ReadError) {
        self.push(BatchEvent::Failure(error.clone()));
    }

    fn on_done(&mut self) {
        self.push(BatchEvent::Done);
    }
}
