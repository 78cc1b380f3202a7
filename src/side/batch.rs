//! A single batch of values inside a side.
//!
//! A batch is open (appendable) until the side rotates it out during a
//! snapshot, after which it is sealed and never mutated again. The
//! sealed/open distinction is what lets snapshots be enumerated after the
//! freeze is released without racing later appends.

use parking_lot::RwLock;

/// One unordered group of values within a [`Side`](super::Side).
///
/// Pushes only happen while the batch is the side's open batch, and only
/// under the side's append gate; once rotated out the batch is immutable.
#[derive(Debug)]
pub(crate) struct Batch<T> {
    values: RwLock<Vec<T>>,
}

impl<T> Batch<T> {
    /// Create an empty batch.
    pub(crate) fn new() -> Self {
        Self {
            values: RwLock::new(Vec::new()),
        }
    }

    /// Add a value to the batch.
    pub(crate) fn push(&self, value: T) {
        self.values.write().push(value);
    }

    /// Number of values in the batch.
    pub(crate) fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether the batch holds no values.
    pub(crate) fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl<T: Clone> Batch<T> {
    /// Clone the batch contents out.
    ///
    /// The internal lock is held only for the duration of the clone, so
    /// callers can iterate the returned values without blocking anyone.
    pub(crate) fn clone_values(&self) -> Vec<T> {
        self.values.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let batch = Batch::new();
        assert!(batch.is_empty());

        batch.push(1);
        batch.push(2);
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_clone_values_leaves_batch_intact() {
        let batch = Batch::new();
        batch.push("a");
        batch.push("b");

        let cloned = batch.clone_values();
        assert_eq!(cloned, vec!["a", "b"]);
        assert_eq!(batch.len(), 2);
    }
}
