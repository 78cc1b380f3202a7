//! Error types for the broadcast protocol.
//!
//! The core protocol has no transient-failure class: every operation either
//! succeeds or indicates a broken caller. The single error here marks the
//! contract violation of asking a side for a snapshot while nobody holds its
//! freeze.

use thiserror::Error;

/// Contract violations of the freeze/snapshot protocol.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// A snapshot was requested while the side is not frozen.
    ///
    /// A snapshot is only meaningful under a held freeze; without one the
    /// batch boundary would be ambiguous and pairs could be lost or
    /// duplicated. Callers reaching this error are broken, not unlucky.
    #[error("snapshot requested while the side is not frozen")]
    NotFrozen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProtocolError::NotFrozen.to_string(),
            "snapshot requested while the side is not frozen"
        );
    }
}
