use serde::{Deserialize, Serialize};

/// Handle to a word: its lane and its slot within that lane.
/// Assigned at setup; valid until the session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRef {
    pub lane: usize,
    pub index: usize,
}

impl WordRef {
    pub fn new(lane: usize, index: usize) -> Self {
        Self { lane, index }
    }
}

/// Lifecycle of a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordState {
    /// Waiting for its turn in the lane.
    Set,
    /// Travelling towards the finish line.
    Moving,
    /// Reached the finish line.
    Finished,
    /// Captured by the player before the finish line.
    Captured,
}

impl WordState {
    /// Finished and Captured have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, WordState::Finished | WordState::Captured)
    }
}

/// Notification emitted by a session to its listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PositionChanged { word: WordRef, position: f32 },
    StateChanged { word: WordRef, state: WordState },
    /// A word was captured; the host appends it to its captured list.
    WordCaptured { word: WordRef, text: String },
    /// A word escaped past the finish line; the host speaks it aloud.
    WordFinished { word: WordRef, text: String },
}

impl SessionEvent {
    /// The word this event refers to.
    pub fn word(&self) -> WordRef {
        match self {
            SessionEvent::PositionChanged { word, .. }
            | SessionEvent::StateChanged { word, .. }
            | SessionEvent::WordCaptured { word, .. }
            | SessionEvent::WordFinished { word, .. } => *word,
        }
    }
}

/// Identifies a registered session listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!WordState::Set.is_terminal());
        assert!(!WordState::Moving.is_terminal());
        assert!(WordState::Finished.is_terminal());
        assert!(WordState::Captured.is_terminal());
    }

    #[test]
    fn event_word_accessor() {
        let word = WordRef::new(2, 3);
        let event = SessionEvent::WordCaptured { word, text: "kiwi".into() };
        assert_eq!(event.word(), word);
    }
}
