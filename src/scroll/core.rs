use std::sync::{Arc, Mutex};

/// Host-implemented contract: bring the item at `index` into view.
///
/// Implementations must tolerate repeated identical requests and indices
/// that are no longer valid by the time the request is serviced.
pub trait ScrollSync: Send + Sync {
    fn reveal(&self, index: usize);
}

/// Default implementation used when the host has no scrollable surface.
#[derive(Debug, Default)]
pub struct NullScrollSync;

impl ScrollSync for NullScrollSync {
    fn reveal(&self, _index: usize) {}
}

/// Test double that records every reveal request in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingScroll {
    requests: Arc<Mutex<Vec<usize>>>,
}

impl RecordingScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl ScrollSync for RecordingScroll {
    fn reveal(&self, index: usize) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(index);
        }
    }
}

/// Wraps a [`ScrollSync`] and drops consecutive duplicate requests so focus
/// churn that lands on the same index does not spam the host.
pub struct ScrollRequester {
    sink: Arc<dyn ScrollSync>,
    last_requested: Option<usize>,
}

impl ScrollRequester {
    pub fn new(sink: Arc<dyn ScrollSync>) -> Self {
        Self {
            sink,
            last_requested: None,
        }
    }

    pub fn reveal(&mut self, index: usize) {
        if self.last_requested == Some(index) {
            return;
        }
        self.last_requested = Some(index);
        self.sink.reveal(index);
    }

    pub fn last_requested(&self) -> Option<usize> {
        self.last_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_duplicates_collapse() {
        let recorder = RecordingScroll::new();
        let mut requester = ScrollRequester::new(Arc::new(recorder.clone()));
        requester.reveal(3);
        requester.reveal(3);
        requester.reveal(4);
        requester.reveal(3);
        assert_eq!(recorder.requests(), vec![3, 4, 3]);
    }

    #[test]
    fn last_request_is_tracked() {
        let mut requester = ScrollRequester::new(Arc::new(NullScrollSync));
        assert_eq!(requester.last_requested(), None);
        requester.reveal(7);
        assert_eq!(requester.last_requested(), Some(7));
    }
}
