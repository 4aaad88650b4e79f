//! The transcript store — the only owner of conversation state.
//!
//! Mutated exclusively through `append` and `reset`. The store does no
//! locking of its own: the interaction controller's busy flag guarantees a
//! single writer, and callers share it behind `Arc<Mutex<_>>`.

use super::{InvalidTurnError, Turn};

/// Ordered transcript, seeded with exactly one system turn.
///
/// There is no length cap. Growth is linear in the number of successful
/// runs (two turns per run) and left untruncated.
pub struct ConversationStore {
    system_prompt: String,
    turns: Vec<Turn>,
}

impl ConversationStore {
    /// Create a store containing only the system turn.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        let turns = vec![Turn::system(system_prompt.clone())];
        Self {
            system_prompt,
            turns,
        }
    }

    /// Append a turn at the tail.
    pub fn append(&mut self, turn: Turn) -> Result<(), InvalidTurnError> {
        if turn.content.is_empty() {
            return Err(InvalidTurnError::EmptyContent);
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Discard everything and re-seed the system turn from the prompt text
    /// captured at construction.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(Turn::system(self.system_prompt.clone()));
        log::info!("[SESSION] Conversation reset");
    }

    /// Owned copy of the full ordered transcript for transmission.
    ///
    /// Copy-on-read: the internal sequence is never handed out for
    /// mutation.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
