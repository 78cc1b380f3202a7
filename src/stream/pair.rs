//! The emitted pair type and the public insert contract.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A subscriber callback, invoked once per emitted pair.
///
/// Invoked synchronously on the inserting thread, with no side or batch
/// lock held. Re-entering the broadcaster from inside the callback is not
/// supported.
pub type PairHandler<T> = Arc<dyn Fn(Pair<T>) + Send + Sync>;

/// One element of the cartesian product of the two sides.
///
/// Pairs are ephemeral: produced during an insertion and handed straight to
/// the subscriber, never stored by the broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair<T> {
    /// The member from side X.
    pub x: T,
    /// The member from side Y.
    pub y: T,
}

impl<T> Pair<T> {
    /// Create a pair from its two members.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: fmt::Display> fmt::Display for Pair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The insert contract shared by every broadcaster implementation.
///
/// Appending a value to one side pairs it with every value already present
/// on the other side and delivers each pair to the subscriber. How reliably
/// that happens under concurrency is up to the implementation: the
/// synchronized [`Broadcaster`](crate::Broadcaster) delivers exactly once,
/// the [`RacyBroadcaster`](crate::RacyBroadcaster) deliberately does not.
pub trait PairStream<T> {
    /// Insert a value on side X.
    fn add_x(&self, value: T);

    /// Insert a value on side Y.
    fn add_y(&self, value: T);
}
