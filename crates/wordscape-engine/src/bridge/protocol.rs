//! Flat event wire format read by the host page.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Each event is four f32 values:
//! ```text
//! [kind, lane, index, value]
//! ```
//! `value` is the position for `EVENT_POSITION`, the state code for
//! `EVENT_STATE`, and zero otherwise. Word text is not on the wire; the host
//! reads it by lane/index.

use bytemuck::{Pod, Zeroable};

use crate::api::types::{SessionEvent, WordRef, WordState};

/// Floats per event record (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

pub const EVENT_POSITION: f32 = 1.0;
pub const EVENT_STATE: f32 = 2.0;
pub const EVENT_CAPTURED: f32 = 3.0;
pub const EVENT_FINISHED: f32 = 4.0;

/// Wire code for a word state.
pub fn state_code(state: WordState) -> f32 {
    match state {
        WordState::Set => 0.0,
        WordState::Moving => 1.0,
        WordState::Finished => 2.0,
        WordState::Captured => 3.0,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub lane: f32,
    pub index: f32,
    pub value: f32,
}

impl EventRecord {
    fn new(kind: f32, word: WordRef, value: f32) -> Self {
        Self {
            kind,
            lane: word.lane as f32,
            index: word.index as f32,
            value,
        }
    }

    pub fn from_event(event: &SessionEvent) -> Self {
        let (kind, value) = match event {
            SessionEvent::PositionChanged { position, .. } => (EVENT_POSITION, *position),
            SessionEvent::StateChanged { state, .. } => (EVENT_STATE, state_code(*state)),
            SessionEvent::WordCaptured { .. } => (EVENT_CAPTURED, 0.0),
            SessionEvent::WordFinished { .. } => (EVENT_FINISHED, 0.0),
        };
        Self::new(kind, event.word(), value)
    }
}

/// View a slice of records as the flat float buffer the host reads.
pub fn as_floats(records: &[EventRecord]) -> &[f32] {
    bytemuck::cast_slice(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_four_floats() {
        assert_eq!(std::mem::size_of::<EventRecord>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn encodes_position_and_state() {
        let word = WordRef::new(2, 1);
        let position =
            EventRecord::from_event(&SessionEvent::PositionChanged { word, position: 42.5 });
        assert_eq!(
            position,
            EventRecord { kind: EVENT_POSITION, lane: 2.0, index: 1.0, value: 42.5 }
        );

        let state = EventRecord::from_event(&SessionEvent::StateChanged {
            word,
            state: WordState::Captured,
        });
        assert_eq!(state.kind, EVENT_STATE);
        assert_eq!(state.value, 3.0);
    }

    #[test]
    fn flattens_in_order() {
        let finished = SessionEvent::WordFinished { word: WordRef::new(0, 3), text: "date".into() };
        let captured = SessionEvent::WordCaptured { word: WordRef::new(1, 0), text: "fig".into() };
        let records = [EventRecord::from_event(&finished), EventRecord::from_event(&captured)];
        let floats = as_floats(&records);
        assert_eq!(floats, &[EVENT_FINISHED, 0.0, 3.0, 0.0, EVENT_CAPTURED, 1.0, 0.0, 0.0]);
    }
}
