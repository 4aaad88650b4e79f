//! Conversation domain — turn types and the transcript store.
//!
//! A conversation is an ordered sequence of role-tagged turns. The order is
//! the protocol: the whole transcript is replayed verbatim to the remote
//! model on every request, which is what gives a stateless endpoint the
//! illusion of memory.

mod store;

pub use store::ConversationStore;

use crate::capture::codec::EncodedAttachment;

/// Who produced a turn.
///
/// Role validity is a compile-time property — there is no way to construct
/// a turn with an out-of-range role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One element of a multi-part turn body.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(EncodedAttachment),
}

/// Body of a turn: plain text, or an ordered sequence of parts.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl TurnContent {
    pub fn is_empty(&self) -> bool {
        match self {
            TurnContent::Text(text) => text.trim().is_empty(),
            TurnContent::Parts(parts) => parts.is_empty(),
        }
    }
}

/// One immutable conversation entry. Turns are never edited in place —
/// the store only appends and resets.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: TurnContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: TurnContent::Text(text.into()),
        }
    }

    /// User turn carrying the question plus the screenshot attachment.
    pub fn user_with_attachment(question: impl Into<String>, attachment: EncodedAttachment) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Parts(vec![
                ContentPart::Text(question.into()),
                ContentPart::Image(attachment),
            ]),
        }
    }

    /// Text of the turn, if it is a plain-text turn.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            TurnContent::Text(text) => Some(text),
            TurnContent::Parts(_) => None,
        }
    }
}

/// A turn that cannot legally enter the transcript.
///
/// Indicates a bug in the caller, not a runtime condition — well-formed
/// pipelines never construct empty turns.
#[derive(Debug, thiserror::Error)]
pub enum InvalidTurnError {
    #[error("turn content is empty")]
    EmptyContent,
}
