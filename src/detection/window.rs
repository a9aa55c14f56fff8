//! Fixed-capacity sliding window over recent observations.

use std::collections::VecDeque;

/// Rolling FIFO history of the most recent observations.
///
/// Pushing beyond capacity evicts the oldest value. Until the window fills,
/// estimation runs on whatever partial history exists; p-values computed on
/// a short history are less reliable, by construction rather than by error.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    buffer: VecDeque<f64>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create a window holding at most `capacity` values (must be > 0,
    /// enforced by detector configuration).
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f64) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    /// Current contents in arrival order, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.buffer.iter().copied().collect()
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the window holds no values yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the window has reached capacity.
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_up_to_capacity() {
        let mut window = SlidingWindow::new(3);
        assert!(window.is_empty());
        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        window.push(3.0);
        assert!(window.is_full());
        assert_eq!(window.capacity(), 3);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut window = SlidingWindow::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(v);
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.snapshot(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn snapshot_preserves_arrival_order() {
        let mut window = SlidingWindow::new(4);
        for v in [9.0, 7.0, 8.0] {
            window.push(v);
        }
        assert_eq!(window.snapshot(), vec![9.0, 7.0, 8.0]);
    }
}
