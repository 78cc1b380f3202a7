//! Broadcaster implementations and the public pair contract.

/// Pair type, subscriber callback alias, and the insert contract trait.
pub mod pair;

/// Pair fan-out with subscriber panic isolation.
pub mod emitter;

/// The synchronized, exactly-once coordinator.
pub mod broadcaster;

/// The unsynchronized negative control.
pub mod baseline;

pub use baseline::RacyBroadcaster;
pub use broadcaster::Broadcaster;
pub use emitter::Emitter;
pub use pair::{Pair, PairHandler, PairStream};
