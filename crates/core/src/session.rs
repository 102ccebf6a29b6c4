use serde::Serialize;
use uuid::Uuid;

use crate::config::resolve_assistant_name;
use crate::error::ChatError;
use crate::models::SessionState;

/// State of one interactive run with one user.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSession {
    session_id: Uuid,
    assistant_name: String,
    user_name: Option<String>,
    turns: u32,
    state: SessionState,
}

impl ConversationSession {
    pub fn new(assistant_name: &str) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            assistant_name: resolve_assistant_name(Some(assistant_name)),
            user_name: None,
            turns: 0,
            state: SessionState::Active,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    pub fn ensure_active(&self) -> Result<(), ChatError> {
        if self.is_terminated() {
            return Err(ChatError::SessionTerminated);
        }
        Ok(())
    }

    /// Counts one processed input and returns the new turn number.
    pub fn begin_turn(&mut self) -> u32 {
        self.turns = self.turns.saturating_add(1);
        self.turns
    }

    /// Stores the user's name unless one is already known. Returns whether
    /// the name was stored.
    pub fn capture_user_name(&mut self, name: String) -> bool {
        if self.user_name.is_some() {
            return false;
        }
        self.user_name = Some(name);
        true
    }

    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }
}
