use std::collections::VecDeque;

use tracing::{debug, instrument, warn};

/// FIFO of scheduled work.
#[derive(Debug, Clone)]
pub struct ScheduledQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for ScheduledQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScheduledQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn enqueue(&mut self, value: T) {
        self.items.push_back(value);
        debug!(len = self.items.len(), "enqueued");
    }

    #[instrument(level = "debug", skip_all)]
    pub fn dequeue(&mut self) -> Option<T> {
        let value = self.items.pop_front();
        if value.is_none() {
            warn!("queue is empty, nothing to dequeue");
        }
        value
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
