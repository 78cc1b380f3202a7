//! Unsynchronized baseline, kept as a negative control.
//!
//! Appends go straight into a side's vector and the opposite vector is read
//! back with no coordination between the two steps. Memory-safe, but
//! logically racy: two opposing insertions can each observe the other's
//! value and emit the same pair twice. The stress test here exists to prove
//! the harness actually exercises the race the synchronized protocol
//! eliminates — do not use this type for anything else.

use parking_lot::RwLock;

use super::emitter::Emitter;
use super::pair::{PairHandler, PairStream};

/// Cartesian-product broadcaster with no cross-side synchronization.
///
/// Correct under a single producer thread; under concurrent producers it
/// duplicates pairs with high probability.
#[derive(Debug)]
pub struct RacyBroadcaster<T> {
    xs: RwLock<Vec<T>>,
    ys: RwLock<Vec<T>>,
    emitter: Emitter<T>,
}

impl<T: Clone> RacyBroadcaster<T> {
    /// Create a racy broadcaster delivering to the given subscriber.
    pub fn new(handler: PairHandler<T>) -> Self {
        Self {
            xs: RwLock::new(Vec::new()),
            ys: RwLock::new(Vec::new()),
            emitter: Emitter::new(handler),
        }
    }

    /// Insert on side X: push, then iterate Y with no freeze in between.
    pub fn add_x(&self, value: T) {
        self.xs.write().push(value.clone());
        // Nothing pins Y's membership between the push above and this read:
        // a concurrent add_y can land in both views.
        let ys = self.ys.read().clone();
        self.emitter.emit_for_x(&value, ys);
    }

    /// Insert on side Y: push, then iterate X with no freeze in between.
    pub fn add_y(&self, value: T) {
        self.ys.write().push(value.clone());
        let xs = self.xs.read().clone();
        self.emitter.emit_for_y(&value, xs);
    }
}

impl<T: Clone> PairStream<T> for RacyBroadcaster<T> {
    fn add_x(&self, value: T) {
        RacyBroadcaster::add_x(self, value);
    }

    fn add_y(&self, value: T) {
        RacyBroadcaster::add_y(self, value);
    }
}
