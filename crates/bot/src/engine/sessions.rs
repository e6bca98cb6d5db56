#![forbid(unsafe_code)]

use sb_core::convo::ConversationState;
use sb_core::ids::UserId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-user conversation state, keyed by user id so simultaneous sessions
/// never interfere. Absent entries read as `Idle`; storing `Idle` removes
/// the entry, which is how terminal transitions destroy a session.
#[derive(Debug, Default)]
pub(crate) struct SessionMap {
    inner: Mutex<HashMap<UserId, ConversationState>>,
}

impl SessionMap {
    pub(crate) fn get(&self, user: UserId) -> ConversationState {
        self.inner
            .lock()
            .map(|map| map.get(&user).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    pub(crate) fn set(&self, user: UserId, state: ConversationState) {
        if let Ok(mut map) = self.inner.lock() {
            if state == ConversationState::Idle {
                map.remove(&user);
            } else {
                map.insert(user, state);
            }
        }
    }

    pub(crate) fn clear(&self, user: UserId) {
        self.set(user, ConversationState::Idle);
    }
}
