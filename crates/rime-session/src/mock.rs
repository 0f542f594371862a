//! In-memory engine for tests
//!
//! Tracks option values per live session and records every push, so
//! switcher logic can be exercised without a running engine.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{OptionSink, OptionSource, SessionId};

/// A recorded `apply_options` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Push {
    pub session: SessionId,
    pub options: Vec<(String, bool)>,
}

/// Mock engine with explicit session lifecycle.
#[derive(Debug, Default)]
pub struct MockEngine {
    next_id: u64,
    sessions: HashMap<SessionId, BTreeMap<String, bool>>,
    pushes: Vec<Push>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its id.
    pub fn create_session(&mut self) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(id, BTreeMap::new());
        id
    }

    /// End a session; later pushes to it are dropped.
    pub fn destroy_session(&mut self, session: SessionId) {
        self.sessions.remove(&session);
    }

    pub fn is_alive(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    /// Set an option as if the engine changed it on its own (e.g. a hotkey).
    pub fn set_option(&mut self, session: SessionId, option: &str, value: bool) {
        if let Some(options) = self.sessions.get_mut(&session) {
            options.insert(option.to_string(), value);
        }
    }

    /// Current options of a live session.
    pub fn options(&self, session: SessionId) -> Option<&BTreeMap<String, bool>> {
        self.sessions.get(&session)
    }

    /// Every push received, including those to dead sessions.
    pub fn pushes(&self) -> &[Push] {
        &self.pushes
    }
}

impl OptionSink for MockEngine {
    fn apply_options(&mut self, session: SessionId, options: &[(String, bool)]) {
        self.pushes.push(Push {
            session,
            options: options.to_vec(),
        });
        match self.sessions.get_mut(&session) {
            Some(current) => {
                for (name, value) in options {
                    current.insert(name.clone(), *value);
                }
            }
            None => debug!(%session, "dropping options for unknown session"),
        }
    }
}

impl OptionSource for MockEngine {
    fn get_option(&self, session: SessionId, option: &str) -> bool {
        self.sessions
            .get(&session)
            .and_then(|options| options.get(option).copied())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_live_session() {
        let mut engine = MockEngine::new();
        let session = engine.create_session();

        engine.apply_options(session, &[("ascii_mode".to_string(), true)]);

        assert!(engine.get_option(session, "ascii_mode"));
        assert_eq!(engine.pushes().len(), 1);
    }

    #[test]
    fn test_dead_session_is_silent() {
        let mut engine = MockEngine::new();
        let session = engine.create_session();
        engine.destroy_session(session);

        engine.apply_options(session, &[("ascii_mode".to_string(), true)]);

        assert!(!engine.get_option(session, "ascii_mode"));
        assert!(!engine.is_alive(session));
        assert_eq!(engine.pushes().len(), 1);
    }

    #[test]
    fn test_unknown_option_reads_false() {
        let mut engine = MockEngine::new();
        let session = engine.create_session();
        assert!(!engine.get_option(session, "full_shape"));
        assert!(!engine.get_option(SessionId(99), "full_shape"));
    }
}
