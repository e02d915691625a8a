use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl Role {
    /// Label used when the turn is written into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("message text is empty")]
pub struct EmptyText;

/// One utterance in the conversation. Text is stored as given and is never
/// blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn new(role: Role, text: &str) -> Result<Self, EmptyText> {
        if text.trim().is_empty() {
            return Err(EmptyText);
        }
        Ok(Self {
            role,
            text: text.to_string(),
        })
    }

    pub fn user(text: &str) -> Result<Self, EmptyText> {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: &str) -> Result<Self, EmptyText> {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only log of turns for one session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Removes the most recently appended turn. Empty store is a no-op.
    pub fn remove_last(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Turns in insertion order. The iterator is `Clone`, so it can be
    /// restarted without touching the store.
    pub fn render(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends the user's turn and hands back a guard for the rest of the
    /// exchange. Unless the guard is committed with a reply, dropping it
    /// removes the user turn again.
    pub fn begin_exchange(&mut self, user: Turn) -> PendingExchange<'_> {
        self.append(user);
        PendingExchange {
            store: self,
            committed: false,
        }
    }
}

pub struct PendingExchange<'a> {
    store: &'a mut ConversationStore,
    committed: bool,
}

impl PendingExchange<'_> {
    /// Everything before the pending user turn.
    pub fn history(&self) -> &[Turn] {
        let turns = self.store.turns();
        &turns[..turns.len() - 1]
    }

    /// The pending user turn.
    pub fn input(&self) -> &Turn {
        let turns = self.store.turns();
        &turns[turns.len() - 1]
    }

    pub fn commit(mut self, reply: Turn) {
        self.store.append(reply);
        self.committed = true;
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.store.remove_last();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(turns: &[(Role, &str)]) -> ConversationStore {
        let mut store = ConversationStore::new();
        for (role, text) in turns {
            store.append(Turn::new(*role, text).unwrap());
        }
        store
    }

    #[test]
    fn turn_text_keeps_surrounding_whitespace() {
        let turn = Turn::user("    let x = 1;\n").unwrap();
        assert_eq!(turn.text(), "    let x = 1;\n");
        assert_eq!(turn.role(), Role::User);
    }

    #[test]
    fn blank_turn_is_rejected() {
        assert_eq!(Turn::user(""), Err(EmptyText));
        assert_eq!(Turn::assistant(" \t\n "), Err(EmptyText));
    }

    #[test]
    fn append_keeps_insertion_order() {
        let store = store_with(&[
            (Role::User, "one"),
            (Role::Assistant, "two"),
            (Role::User, "three"),
        ]);
        let texts: Vec<&str> = store.render().map(Turn::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_last_on_empty_store_is_a_no_op() {
        let mut store = ConversationStore::new();
        assert!(store.remove_last().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_last_returns_most_recent_turn() {
        let mut store = store_with(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        let removed = store.remove_last().unwrap();
        assert_eq!(removed.role(), Role::Assistant);
        assert_eq!(removed.text(), "hello");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut store = store_with(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn render_can_be_restarted() {
        let store = store_with(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        let rendered = store.render();
        let first: Vec<Turn> = rendered.clone().cloned().collect();
        let second: Vec<Turn> = rendered.cloned().collect();
        assert_eq!(first, second);
        assert_eq!(store.render().count(), 2);
    }

    #[test]
    fn committed_exchange_keeps_both_turns() {
        let mut store = store_with(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        let pending = store.begin_exchange(Turn::user("bye").unwrap());
        assert_eq!(pending.history().len(), 2);
        assert_eq!(pending.input().text(), "bye");
        pending.commit(Turn::assistant("see you").unwrap());

        assert_eq!(store.len(), 4);
        assert_eq!(store.turns()[3].role(), Role::Assistant);
    }

    #[test]
    fn dropped_exchange_rolls_back_user_turn() {
        let mut store = store_with(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        let before = store.turns().to_vec();
        {
            let pending = store.begin_exchange(Turn::user("bye").unwrap());
            assert_eq!(pending.input().role(), Role::User);
        }
        assert_eq!(store.turns(), before.as_slice());
    }
}
