//! Conversation turn types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Roles for conversation participants.
///
/// # Examples
///
/// ```
/// use curator_core::Role;
///
/// assert_eq!(format!("{}", Role::Assistant), "assistant");
/// assert_eq!(Role::parse("user"), Some(Role::User));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Messages from the scientist
    #[display("user")]
    User,
    /// Messages from the agent
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Stable lowercase name, matching the stored column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parse a role name; `None` for anything outside the allowed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// One append-only turn of a capture conversation.
///
/// Turns are never mutated or merged; they exist as read-only context for
/// the orchestrator and are deleted together with the session's drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The session this turn belongs to
    pub session_id: String,
    /// Who spoke
    pub role: Role,
    /// What was said
    pub content: String,
    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
}

/// Per-session rollup of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// The session being summarized
    pub session_id: String,
    /// Timestamp of the earliest turn
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest turn
    pub last_active: DateTime<Utc>,
    /// Total turns across both roles
    pub message_count: i64,
    /// Content of the earliest user turn, `None` while none exists
    pub first_message: Option<String>,
}

impl SessionSummary {
    /// Roll a flat turn log up into one summary per session, most recently
    /// active first.
    ///
    /// `first_message` carries the earliest user turn so a session list can
    /// show what the scientist opened with; assistant turns still count
    /// toward `message_count`.
    pub fn collect(turns: &[ConversationTurn]) -> Vec<SessionSummary> {
        let mut sessions: BTreeMap<&str, SessionSummary> = BTreeMap::new();
        let mut first_user: BTreeMap<&str, DateTime<Utc>> = BTreeMap::new();

        for turn in turns {
            let entry = sessions
                .entry(&turn.session_id)
                .or_insert_with(|| SessionSummary {
                    session_id: turn.session_id.clone(),
                    created_at: turn.created_at,
                    last_active: turn.created_at,
                    message_count: 0,
                    first_message: None,
                });
            entry.message_count += 1;
            entry.created_at = entry.created_at.min(turn.created_at);
            entry.last_active = entry.last_active.max(turn.created_at);

            if turn.role == Role::User
                && first_user
                    .get(turn.session_id.as_str())
                    .is_none_or(|&seen| turn.created_at < seen)
            {
                first_user.insert(&turn.session_id, turn.created_at);
                entry.first_message = Some(turn.content.clone());
            }
        }

        let mut summaries: Vec<_> = sessions.into_values().collect();
        summaries.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        summaries
    }
}
