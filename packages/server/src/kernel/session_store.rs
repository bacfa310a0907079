//! Per-session conversation memory.
//!
//! In-process state keyed by opaque session id. Each session owns a bounded,
//! ordered list of conversation turns; the cap drops the oldest turns first.
//! A session's memory sits behind its own async mutex so concurrent requests
//! for the same session serialize their read-prompt/write-reply cycles
//! (single writer per session), while different sessions never contend.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Maximum number of turns kept per session.
pub const MAX_MEMORY_TURNS: usize = 10;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering the history into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "AI",
        }
    }
}

/// Ordered, bounded sequence of conversation turns.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    turns: Vec<(Role, String)>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, dropping the oldest turns beyond the cap.
    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push((role, text.into()));
        if self.turns.len() > MAX_MEMORY_TURNS {
            let excess = self.turns.len() - MAX_MEMORY_TURNS;
            self.turns.drain(..excess);
        }
    }

    /// Render the history as "User: ..." / "AI: ..." lines for the prompt.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|(role, text)| format!("{}: {}", role.label(), text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// In-process session store.
///
/// Thread-safe, cloneable. Keyed by opaque session-id strings.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<ConversationMemory>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the memory handle for a session, creating it if absent.
    ///
    /// Callers hold the returned mutex for the whole read-prompt/write-reply
    /// cycle so no two requests for the same session interleave writes.
    pub async fn session(&self, session_id: &str) -> Arc<Mutex<ConversationMemory>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(memory) = sessions.get(session_id) {
                return memory.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ConversationMemory::new())))
            .clone()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_truncates_from_oldest_end() {
        let mut memory = ConversationMemory::new();
        for i in 0..12 {
            memory.push(Role::User, format!("message {}", i));
        }

        assert_eq!(memory.len(), MAX_MEMORY_TURNS);
        assert!(memory.render().starts_with("User: message 2"));
        assert!(memory.render().ends_with("User: message 11"));
    }

    #[test]
    fn test_render_labels_turns() {
        let mut memory = ConversationMemory::new();
        memory.push(Role::User, "hi");
        memory.push(Role::Assistant, "hello there");

        assert_eq!(memory.render(), "User: hi\nAI: hello there");
    }

    #[tokio::test]
    async fn test_same_session_returns_same_memory() {
        let store = SessionStore::new();

        {
            let session = store.session("s1").await;
            session.lock().await.push(Role::User, "first");
        }
        let session = store.session("s1").await;

        assert_eq!(session.lock().await.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();

        store.session("a").await.lock().await.push(Role::User, "for a");
        let b = store.session("b").await;

        assert!(b.lock().await.is_empty());
        assert_eq!(store.len().await, 2);
    }
}
