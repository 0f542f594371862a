//! Rime engine session boundary
//!
//! The front-end never owns engine sessions. It holds an opaque numeric id
//! issued by the engine and talks to it through two narrow capabilities:
//! [`OptionSink`] to push option values and [`OptionSource`] to read them.

pub mod mock;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use mock::MockEngine;

/// Opaque, engine-issued session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl SessionId {
    /// The engine never issues 0; it stands for "no session".
    pub const NONE: SessionId = SessionId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for SessionId {
    fn from(raw: u64) -> Self {
        SessionId(raw)
    }
}

/// Receives option values for a session.
///
/// Delivery is fire-and-forget: implementations must not panic on an
/// unknown or expired session, and callers never learn whether a value
/// was accepted.
pub trait OptionSink {
    fn apply_options(&mut self, session: SessionId, options: &[(String, bool)]);
}

/// Reports the engine's current value of an option.
///
/// Unknown sessions and unknown options read as `false`.
pub trait OptionSource {
    fn get_option(&self, session: SessionId, option: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_session() {
        assert!(SessionId::NONE.is_none());
        assert!(!SessionId(7).is_none());
        assert_eq!(SessionId::from(255).to_string(), "0xff");
    }
}
