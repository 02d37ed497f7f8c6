//! Session and conversation history types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of turns retained per session.
///
/// Counted in entries, not exchanges: a user/ai pair is two turns.
pub const HISTORY_CAP: usize = 10;

/// Maximum length of a session name
const MAX_NAME_LEN: usize = 64;

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human asking questions
    User,
    /// The model's answer
    Ai,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Ai => write!(f, "ai"),
        }
    }
}

/// A single conversation turn, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke
    pub role: Role,
    /// What was said
    pub content: String,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an ai turn
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
        }
    }
}

/// Ordered conversation history with a retention cap.
///
/// Serialized only at the store boundary; in-process it is a typed list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. The cap is enforced by [`History::truncate_to_cap`],
    /// applied before persisting.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Keep only the most recent [`HISTORY_CAP`] turns.
    pub fn truncate_to_cap(&mut self) {
        if self.turns.len() > HISTORY_CAP {
            self.turns.drain(..self.turns.len() - HISTORY_CAP);
        }
    }

    /// Turns in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl From<Vec<Turn>> for History {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

/// Validate a session name before it is used as a store key and a
/// vector-collection name.
///
/// Policy: 1-64 characters from `[A-Za-z0-9_-]`. Keeps the name safe as a
/// namespace key in every external store it is passed to.
pub fn validate_session_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("Session name is required"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(Error::validation(format!(
            "Session name too long (max {} characters)",
            MAX_NAME_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::validation(
            "Session name may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_most_recent() {
        let mut history = History::new();
        for i in 0..14 {
            history.push(Turn::user(format!("q{}", i)));
        }
        history.truncate_to_cap();

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.turns()[0].content, "q4");
        assert_eq!(history.turns()[9].content, "q13");
    }

    #[test]
    fn test_truncate_noop_under_cap() {
        let mut history = History::from(vec![Turn::user("hi"), Turn::ai("<p>hello</p>")]);
        history.truncate_to_cap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = Turn::ai("<p>answer</p>");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"role\":\"ai\""));
    }

    #[test]
    fn test_valid_session_names() {
        assert!(validate_session_name("demo").is_ok());
        assert!(validate_session_name("my-session_2").is_ok());
        assert!(validate_session_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_invalid_session_names() {
        assert!(validate_session_name("").is_err());
        assert!(validate_session_name("has space").is_err());
        assert!(validate_session_name("slash/name").is_err());
        assert!(validate_session_name(&"a".repeat(65)).is_err());
    }
}
