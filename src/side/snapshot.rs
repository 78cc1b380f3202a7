//! One-shot snapshot of a side's membership.
//!
//! A snapshot is taken under a held freeze and enumerated afterwards. It
//! holds shared references to the sealed batches rather than a copy of
//! their contents, so sealing stays O(1) no matter how many values exist;
//! values are cloned out batch by batch during iteration, after the freeze
//! is long gone.

use std::sync::Arc;
use std::vec;

use super::batch::Batch;

/// A stable enumeration of every value a side held when it was frozen.
///
/// Consuming the snapshot is the only way to read it, which makes the
/// one-shot property of the protocol a type-level fact rather than a
/// runtime check.
#[derive(Debug)]
pub struct Snapshot<T> {
    batches: Vec<Arc<Batch<T>>>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(batches: Vec<Arc<Batch<T>>>) -> Self {
        Self { batches }
    }

    /// Total number of values in the snapshot.
    pub fn len(&self) -> usize {
        self.batches.iter().map(|b| b.len()).sum()
    }

    /// Whether the snapshot holds no values.
    pub fn is_empty(&self) -> bool {
        self.batches.iter().all(|b| b.is_empty())
    }
}

impl<T: Clone> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = SnapshotIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SnapshotIter {
            batches: self.batches.into_iter(),
            current: Vec::new().into_iter(),
        }
    }
}

/// Owning iterator over a [`Snapshot`].
///
/// Each batch's values are cloned out in one go when the iterator reaches
/// it; no side or batch lock is held between `next` calls, so subscriber
/// callbacks run lock-free.
#[derive(Debug)]
pub struct SnapshotIter<T> {
    batches: vec::IntoIter<Arc<Batch<T>>>,
    current: vec::IntoIter<T>,
}

impl<T: Clone> Iterator for SnapshotIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }
            let batch = self.batches.next()?;
            self.current = batch.clone_values().into_iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_of(values: &[i32]) -> Arc<Batch<i32>> {
        let batch = Batch::new();
        for &v in values {
            batch.push(v);
        }
        Arc::new(batch)
    }

    #[test]
    fn test_iterates_all_batches() {
        let snapshot = Snapshot::new(vec![batch_of(&[1, 2]), batch_of(&[]), batch_of(&[3])]);
        assert_eq!(snapshot.len(), 3);

        let mut values: Vec<i32> = snapshot.into_iter().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: Snapshot<i32> = Snapshot::new(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.into_iter().count(), 0);
    }
}
