//! Pushing switcher state to the engine
//!
//! One-way and fire-and-forget: the engine's reaction is never observed
//! here. Pulling state back is [`OptionSwitcher::reconcile`].

use rime_session::{OptionSink, SessionId};
use tracing::debug;

use crate::switcher::OptionSwitcher;

/// Send the switcher's engine options to `session` in a single batch.
///
/// Does nothing for [`SessionId::NONE`] or an empty switcher.
pub fn push_switcher(switcher: &OptionSwitcher, sink: &mut dyn OptionSink, session: SessionId) {
    if session.is_none() || switcher.is_empty() {
        return;
    }
    let options = switcher.engine_options();
    debug!(
        %session,
        schema = switcher.schema_id(),
        version = switcher.version(),
        count = options.len(),
        "pushing options to session"
    );
    sink.apply_options(session, &options);
}

impl OptionSwitcher {
    /// Push the current state to an engine session.
    pub fn update_with_session(&self, sink: &mut dyn OptionSink, session: SessionId) {
        push_switcher(self, sink, session);
    }
}

/// Owns the engine-side sink the host pushes through.
#[derive(Debug)]
pub struct SessionSync<S: OptionSink> {
    sink: S,
}

impl<S: OptionSink> SessionSync<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Push `switcher` to `session`.
    pub fn push(&mut self, switcher: &OptionSwitcher, session: SessionId) {
        push_switcher(switcher, &mut self.sink, session);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}
