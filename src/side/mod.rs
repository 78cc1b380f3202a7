//! Freezable append-only side of a broadcaster.
//!
//! A [`Side`] collects one stream's values into a sequence of batches.
//! Appends go into the single open batch; a freeze blocks appends so that
//! the opposite side's insertion can take a consistent [`Snapshot`] of
//! everything appended so far. Snapshotting seals the open batch and opens
//! a fresh one, so sealing costs O(1) regardless of how many values the
//! side already holds.
//!
//! Two access modes mediate the gate: by default appends take shared access
//! and freezes take exclusive access. The roles can be swapped per side for
//! the reduced-contention protocol variant; either way the two operations
//! always use opposite modes, so an append can never interleave with a
//! freeze window.

/// Batch storage for a side.
mod batch;

/// Snapshot view and its iterator.
mod snapshot;

pub use snapshot::{Snapshot, SnapshotIter};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ProtocolError;
use batch::Batch;

// ---------------------------------------------------------------------------
// Access modes
// ---------------------------------------------------------------------------

/// Gate access mode for one of a side's two operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any number of holders at once.
    Shared,
    /// A single holder, excluding everyone else.
    Exclusive,
}

impl Access {
    /// The opposite mode.
    fn inverse(self) -> Self {
        match self {
            Access::Shared => Access::Exclusive,
            Access::Exclusive => Access::Shared,
        }
    }
}

/// A held acquisition of the side's gate in either mode.
#[derive(Debug)]
enum GatePermit<'a> {
    Shared(RwLockReadGuard<'a, ()>),
    Exclusive(RwLockWriteGuard<'a, ()>),
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// An append-only, unbounded container for one stream's values.
///
/// All mutation is synchronized: appends hold the gate in the side's append
/// mode, freezes hold it in the opposite mode, and the batch list has its
/// own lock so rotation stays safe even when the freeze mode is shared.
#[derive(Debug)]
pub struct Side<T> {
    /// Label used in trace logs ("x" or "y").
    label: &'static str,
    /// Gate excluding appends from freeze windows.
    gate: RwLock<()>,
    /// All batches, oldest first; the last one is open for append.
    batches: Mutex<Vec<Arc<Batch<T>>>>,
    /// Mode appends acquire the gate in.
    append_access: Access,
    /// Number of currently held freezes.
    freeze_holds: AtomicUsize,
}

impl<T> Side<T> {
    /// Create an empty, unfrozen side.
    ///
    /// `append_access` fixes the gate mode for appends; freezes use the
    /// opposite mode.
    pub fn new(label: &'static str, append_access: Access) -> Self {
        Self {
            label,
            gate: RwLock::new(()),
            batches: Mutex::new(vec![Arc::new(Batch::new())]),
            append_access,
            freeze_holds: AtomicUsize::new(0),
        }
    }

    /// Add a value to the open batch.
    ///
    /// Safe for unbounded concurrent invocation while the side is not
    /// frozen. Blocks until any conflicting freeze is released; the value
    /// is never dropped and never lands ambiguously relative to a
    /// concurrent snapshot.
    pub fn append(&self, value: T) {
        self.append_token().push(value);
    }

    /// Acquire the gate for appending without pushing anything yet.
    ///
    /// Splitting acquisition from the push lets a caller coordinating two
    /// sides order its lock acquisitions globally; the push itself can then
    /// happen at the protocol-mandated point.
    pub fn append_token(&self) -> AppendToken<'_, T> {
        AppendToken {
            side: self,
            _permit: self.acquire(self.append_access),
        }
    }

    /// Freeze the side, blocking appends until the guard is dropped.
    ///
    /// Blocks until no conflicting append or freeze is outstanding. Not
    /// reentrant: a thread must not freeze the same side twice without
    /// dropping the first guard.
    pub fn freeze(&self) -> FreezeGuard<'_, T> {
        let permit = self.acquire(self.append_access.inverse());
        self.freeze_holds.fetch_add(1, Ordering::SeqCst);
        log::trace!("side {}: frozen", self.label);
        FreezeGuard {
            side: self,
            _permit: permit,
        }
    }

    /// Take a snapshot, verifying at runtime that the side is frozen.
    ///
    /// Prefer [`FreezeGuard::snapshot`], which makes the precondition
    /// unrepresentable. This checked entry point exists for callers that
    /// manage the freeze out of band; invoking it unfrozen is a
    /// programming error, reported as [`ProtocolError::NotFrozen`] rather
    /// than as silently inconsistent data.
    pub fn try_snapshot(&self) -> Result<Snapshot<T>, ProtocolError> {
        if self.freeze_holds.load(Ordering::SeqCst) == 0 {
            return Err(ProtocolError::NotFrozen);
        }
        Ok(self.rotate())
    }

    /// Whether any freeze is currently held.
    pub fn is_frozen(&self) -> bool {
        self.freeze_holds.load(Ordering::SeqCst) > 0
    }

    /// Total number of values appended so far.
    pub fn len(&self) -> usize {
        self.batches.lock().iter().map(|b| b.len()).sum()
    }

    /// Whether no value has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal the open batch and collect everything appended before it.
    ///
    /// An empty open batch is reused instead of sealed, so idle
    /// freeze/snapshot cycles do not accumulate empty batches.
    fn rotate(&self) -> Snapshot<T> {
        let mut batches = self.batches.lock();
        let open_is_empty = batches.last().map(|b| b.is_empty()).unwrap_or(true);
        if !open_is_empty {
            batches.push(Arc::new(Batch::new()));
        }
        let sealed = batches[..batches.len() - 1].to_vec();
        log::trace!(
            "side {}: snapshot over {} sealed batch(es)",
            self.label,
            sealed.len()
        );
        Snapshot::new(sealed)
    }

    fn acquire(&self, access: Access) -> GatePermit<'_> {
        match access {
            Access::Shared => GatePermit::Shared(self.gate.read()),
            Access::Exclusive => GatePermit::Exclusive(self.gate.write()),
        }
    }

    #[cfg(test)]
    fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Permission to append to a side, held until dropped.
///
/// While any token is held, no conflicting freeze can begin.
#[derive(Debug)]
pub struct AppendToken<'a, T> {
    side: &'a Side<T>,
    _permit: GatePermit<'a>,
}

impl<T> AppendToken<'_, T> {
    /// Push a value into the side's open batch.
    pub fn push(&self, value: T) {
        let open = {
            let batches = self.side.batches.lock();
            // The open batch cannot rotate while this token is held: rotation
            // requires the gate in the opposite mode.
            Arc::clone(batches.last().expect("side always has an open batch"))
        };
        open.push(value);
    }
}

/// Exclusive (or, under role swap, shared) hold on a frozen side.
///
/// Dropping the guard unfreezes the side and unblocks queued appends.
#[derive(Debug)]
pub struct FreezeGuard<'a, T> {
    side: &'a Side<T>,
    _permit: GatePermit<'a>,
}

impl<T> FreezeGuard<'_, T> {
    /// Seal the open batch and return every value appended before the
    /// freeze was acquired.
    ///
    /// Appends that raced in before the freeze was fully established landed
    /// in the now-sealed batch and are included; once the guard is dropped,
    /// new appends accumulate in the fresh open batch and are only visible
    /// to a future snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.side
            .try_snapshot()
            .expect("freeze guard is held, so the side must be frozen")
    }
}

impl<T> Drop for FreezeGuard<'_, T> {
    fn drop(&mut self) {
        self.side.freeze_holds.fetch_sub(1, Ordering::SeqCst);
        log::trace!("side {}: unfrozen", self.side.label);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
