//! Pair fan-out to the subscriber.
//!
//! The emitter is purely a fan-out: it orients each snapshot value into an
//! `(x, y)` pair and invokes the subscriber once per pair. It has no
//! synchronization concerns of its own; by the time it runs, the inserting
//! thread holds no lock on either side.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::pair::{Pair, PairHandler};

/// Invokes the subscriber callback once per derived pair.
pub struct Emitter<T> {
    handler: PairHandler<T>,
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}

impl<T: Clone> Emitter<T> {
    /// Create an emitter delivering to the given subscriber.
    pub fn new(handler: PairHandler<T>) -> Self {
        Self { handler }
    }

    /// Emit `(x, v)` for every `v` in `ys`.
    pub fn emit_for_x<I>(&self, x: &T, ys: I)
    where
        I: IntoIterator<Item = T>,
    {
        for y in ys {
            self.dispatch(Pair::new(x.clone(), y));
        }
    }

    /// Emit `(v, y)` for every `v` in `xs`.
    pub fn emit_for_y<I>(&self, y: &T, xs: I)
    where
        I: IntoIterator<Item = T>,
    {
        for x in xs {
            self.dispatch(Pair::new(x, y.clone()));
        }
    }

    /// Invoke the subscriber for one pair, isolating panics.
    ///
    /// A panicking subscriber must not tear down the inserting thread or
    /// starve the remaining pairs of the same insertion.
    fn dispatch(&self, pair: Pair<T>) {
        let result = catch_unwind(AssertUnwindSafe(|| (self.handler)(pair)));
        if result.is_err() {
            log::error!("subscriber panicked while handling a pair; continuing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use parking_lot::Mutex;

    fn recording() -> (Arc<Mutex<Vec<Pair<i32>>>>, PairHandler<i32>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: PairHandler<i32> = Arc::new(move |pair| sink.lock().push(pair));
        (seen, handler)
    }

    #[test]
    fn test_emit_for_x_orients_pairs() {
        let (seen, handler) = recording();
        let emitter = Emitter::new(handler);

        emitter.emit_for_x(&7, vec![1, 2]);
        assert_eq!(&*seen.lock(), &[Pair::new(7, 1), Pair::new(7, 2)]);
    }

    #[test]
    fn test_emit_for_y_orients_pairs() {
        let (seen, handler) = recording();
        let emitter = Emitter::new(handler);

        emitter.emit_for_y(&7, vec![1, 2]);
        assert_eq!(&*seen.lock(), &[Pair::new(1, 7), Pair::new(2, 7)]);
    }

    #[test]
    fn test_subscriber_panic_does_not_skip_remaining_pairs() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: PairHandler<i32> = Arc::new(move |pair: Pair<i32>| {
            if pair.y == 2 {
                panic!("boom");
            }
            sink.lock().push(pair);
        });

        let emitter = Emitter::new(handler);
        emitter.emit_for_x(&0, vec![1, 2, 3]);
        assert_eq!(&*seen.lock(), &[Pair::new(0, 1), Pair::new(0, 3)]);
    }
}
