//! Broadcaster configuration.
//!
//! Configuration is fixed at construction time. The only tunable is the
//! locking protocol the two sides run under.

use serde::{Deserialize, Serialize};

/// Locking protocol for the two sides of a broadcaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreezeProtocol {
    /// Appends take shared gate access and freezes take exclusive access on
    /// both sides. Freeze/snapshot windows are strictly serialized per
    /// side. This is the reference-correct mode.
    #[default]
    ExclusiveFreeze,

    /// Role-swapped locking on side X: appends to X take exclusive access
    /// and freezes of X take shared access, while side Y keeps the default
    /// roles. Insertions into Y then hold only shared access on both sides
    /// and proceed fully in parallel, which trades freeze atomicity on X
    /// for reduced contention under a Y-heavy insert mix.
    ///
    /// Overlapping shared freezes of X observe identical membership because
    /// batch rotation is serialized internally, so delivery remains
    /// exactly-once. Prefer [`FreezeProtocol::ExclusiveFreeze`] unless the
    /// workload is measurably Y-dominated.
    RoleSwap,
}

/// Construction-time configuration for a broadcaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Locking protocol for the two sides.
    pub protocol: FreezeProtocol,
}

impl BroadcastConfig {
    /// Configuration for the role-swapped protocol.
    pub fn role_swap() -> Self {
        Self {
            protocol: FreezeProtocol::RoleSwap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_protocol_is_exclusive() {
        assert_eq!(
            BroadcastConfig::default().protocol,
            FreezeProtocol::ExclusiveFreeze
        );
    }

    #[test]
    fn test_role_swap_constructor() {
        assert_eq!(
            BroadcastConfig::role_swap().protocol,
            FreezeProtocol::RoleSwap
        );
    }
}
