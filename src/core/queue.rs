//! Thread-safe FIFO transport between producers and the consumer

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Unbounded blocking FIFO shared by any number of producers and one
/// consumer.
///
/// A single mutex guards the storage and is held only for the push/pop
/// critical section; waiting is cooperative on a condition variable, never
/// a spin loop. Elements come out in global arrival order and are neither
/// duplicated nor dropped.
pub struct BlockingQueue<T> {
    inner: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueue at the tail and wake one waiting consumer. Never blocks
    /// beyond the lock itself.
    pub fn push(&self, value: T) {
        let mut queue = self.inner.lock();
        queue.push_back(value);
        drop(queue);
        self.not_empty.notify_one();
    }

    /// Dequeue from the head, blocking until an element is available.
    pub fn pop(&self) -> T {
        let mut queue = self.inner.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                return value;
            }
            self.not_empty.wait(&mut queue);
        }
    }

    /// Dequeue from the head without blocking.
    pub fn try_pop(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    /// Dequeue from the head, blocking up to `timeout`. Returns `None` if
    /// the queue stayed empty for the whole window.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut queue = self.inner.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                return Some(value);
            }
            if self.not_empty.wait_until(&mut queue, deadline).timed_out() {
                return queue.pop_front();
            }
        }
    }

    /// Atomically remove and return everything currently queued, in order,
    /// blocking until at least one element exists.
    pub fn drain(&self) -> Vec<T> {
        let mut queue = self.inner.lock();
        while queue.is_empty() {
            self.not_empty.wait(&mut queue);
        }
        queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
