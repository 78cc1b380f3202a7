//! The synchronized coordinator.
//!
//! A [`Broadcaster`] owns both sides and drives the insertion protocol:
//! freeze the opposite side, append to the home side inside that freeze
//! window, snapshot the opposite side, release, then emit one pair per
//! snapshot value. The freeze window guarantees that for any two
//! concurrently inserted values, exactly one of the two insertions sees the
//! other's value in its snapshot — which is the whole exactly-once
//! argument.
//!
//! # Lock ordering
//!
//! Each insertion needs the home side's gate in append mode and the
//! opposite side's gate in freeze mode. Acquiring them in protocol order
//! (opposite first) from both directions forms a classic two-lock cycle, so
//! both `add_x` and `add_y` acquire the X gate before the Y gate instead.
//! Acquisition order is independent of operation order: the append still
//! happens strictly inside the opposite freeze window, which is all the
//! correctness argument needs, and the single global order makes a wait
//! cycle impossible.

use crate::config::{BroadcastConfig, FreezeProtocol};
use crate::side::{Access, Side};

use super::emitter::Emitter;
use super::pair::{PairHandler, PairStream};

/// Concurrent cartesian-product broadcaster with exactly-once delivery.
///
/// The subscriber is fixed at construction; there is no late rebinding and
/// therefore no window in which an emitted pair could race a subscriber
/// swap or find none registered.
///
/// Re-entrant insertion from inside the subscriber callback is not
/// supported and may deadlock.
#[derive(Debug)]
pub struct Broadcaster<T> {
    xs: Side<T>,
    ys: Side<T>,
    emitter: Emitter<T>,
    config: BroadcastConfig,
}

impl<T: Clone> Broadcaster<T> {
    /// Create a broadcaster with the default (exclusive-freeze) protocol.
    pub fn new(handler: PairHandler<T>) -> Self {
        Self::with_config(BroadcastConfig::default(), handler)
    }

    /// Create a broadcaster with an explicit protocol configuration.
    pub fn with_config(config: BroadcastConfig, handler: PairHandler<T>) -> Self {
        let x_append = match config.protocol {
            FreezeProtocol::ExclusiveFreeze => Access::Shared,
            FreezeProtocol::RoleSwap => Access::Exclusive,
        };
        log::debug!("broadcaster created with protocol {:?}", config.protocol);
        Self {
            xs: Side::new("x", x_append),
            ys: Side::new("y", Access::Shared),
            emitter: Emitter::new(handler),
            config,
        }
    }

    /// The configuration this broadcaster was built with.
    pub fn config(&self) -> &BroadcastConfig {
        &self.config
    }

    /// Insert a value on side X, pairing it with every value currently on
    /// side Y.
    ///
    /// Blocks while side Y is frozen by a concurrent insertion; pairs are
    /// emitted on the calling thread after all gates are released.
    pub fn add_x(&self, value: T) {
        // X gate before Y gate; the push happens inside Y's freeze window.
        let home = self.xs.append_token();
        let frozen = self.ys.freeze();
        home.push(value.clone());
        let snapshot = frozen.snapshot();
        drop(frozen);
        drop(home);

        self.emitter.emit_for_x(&value, snapshot);
    }

    /// Insert a value on side Y, pairing it with every value currently on
    /// side X.
    pub fn add_y(&self, value: T) {
        // X gate before Y gate; the push happens inside X's freeze window.
        let frozen = self.xs.freeze();
        let home = self.ys.append_token();
        home.push(value.clone());
        let snapshot = frozen.snapshot();
        drop(frozen);
        drop(home);

        self.emitter.emit_for_y(&value, snapshot);
    }
}

impl<T: Clone> PairStream<T> for Broadcaster<T> {
    fn add_x(&self, value: T) {
        Broadcaster::add_x(self, value);
    }

    fn add_y(&self, value: T) {
        Broadcaster::add_y(self, value);
    }
}
