//! # paircast
//!
//! Concurrent cartesian-product broadcaster: two sides, X and Y, each fed
//! by any number of producer threads. Every value appended to one side is
//! paired with every value already present on the other side at that
//! instant, and each pair is delivered to the subscriber exactly once —
//! never lost, never duplicated — regardless of how the producers
//! interleave, and without deadlocking.
//!
//! The synchronization lives in [`Side`]: a freezable append buffer whose
//! freeze/snapshot cycle gives each insertion a stable boundary on the
//! opposite side. [`Broadcaster`] drives the protocol and
//! [`RacyBroadcaster`] is the deliberately unsynchronized negative control
//! used by the stress tests.
//!
//! ```
//! use std::sync::Arc;
//!
//! use paircast::{Broadcaster, Pair, PairStream};
//! use parking_lot::Mutex;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let stream = Broadcaster::new(Arc::new(move |pair: Pair<i32>| sink.lock().push(pair)));
//!
//! stream.add_x(1); // side Y is still empty: nothing to pair with
//! stream.add_y(10); // pairs with the existing 1
//! stream.add_x(2); // pairs with the existing 10
//!
//! assert_eq!(&*seen.lock(), &[Pair::new(1, 10), Pair::new(2, 10)]);
//! ```
//!
//! Subscriber callbacks run synchronously on the inserting thread with no
//! internal lock held; re-entering the broadcaster from a callback is not
//! supported.

/// Broadcaster configuration.
pub mod config;

/// Protocol contract-violation errors.
pub mod error;

/// The freezable append buffer.
pub mod side;

/// Broadcaster implementations and the pair contract.
pub mod stream;

pub use config::{BroadcastConfig, FreezeProtocol};
pub use error::ProtocolError;
pub use side::{Access, AppendToken, FreezeGuard, Side, Snapshot, SnapshotIter};
pub use stream::{Broadcaster, Emitter, Pair, PairHandler, PairStream, RacyBroadcaster};
