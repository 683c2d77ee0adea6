use crate::api::config::SpeedRange;
use crate::api::types::{SessionEvent, WordRef, WordState};
use crate::core::rng::SpeedSampler;
use crate::core::word::{Track, WordEntity, WordMachine};

/// An ordered queue of words that activate one at a time.
///
/// At most one word is Moving; word `i + 1` only leaves Set after word `i`
/// has reached a terminal state.
#[derive(Debug, Clone)]
pub struct Lane {
    index: usize,
    words: Vec<WordMachine>,
}

impl Lane {
    /// Build lane `index` from its word texts, sampling a speed for each.
    pub fn new<S: AsRef<str>>(
        index: usize,
        texts: &[S],
        sampler: &mut dyn SpeedSampler,
        range: SpeedRange,
    ) -> Self {
        let words = texts
            .iter()
            .enumerate()
            .map(|(slot, text)| {
                let entity = WordEntity::sampled(text.as_ref(), sampler, range);
                WordMachine::new(entity, WordRef::new(index, slot))
            })
            .collect();
        Self { index, words }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn words(&self) -> &[WordMachine] {
        &self.words
    }

    pub fn word(&self, slot: usize) -> Option<&WordMachine> {
        self.words.get(slot)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word currently Moving, if any.
    pub fn moving_word(&self) -> Option<&WordMachine> {
        self.words.iter().find(|w| w.is_moving())
    }

    pub fn has_moving_word(&self) -> bool {
        self.moving_word().is_some()
    }

    /// True while any word is still Set or Moving.
    pub fn has_active_or_pending_word(&self) -> bool {
        self.words
            .iter()
            .any(|w| matches!(w.state(), WordState::Set | WordState::Moving))
    }

    /// Activate the first word still in Set. Returns false if there is none.
    ///
    /// Does nothing while another word in the lane is Moving, so repeated
    /// starts never put two words in motion.
    pub fn activate_first_eligible(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if self.has_moving_word() {
            return false;
        }
        match self.words.iter_mut().find(|w| w.state() == WordState::Set) {
            Some(word) => word.activate(events),
            None => false,
        }
    }

    /// Advance the moving word, if any. Returns true if a word was moving.
    pub fn tick(&mut self, dt: f32, track: Track, events: &mut Vec<SessionEvent>) -> bool {
        let Some(slot) = self.words.iter().position(|w| w.is_moving()) else {
            return false;
        };
        if self.words[slot].advance(dt, track, events).is_some() {
            self.on_word_terminal(slot, events);
        }
        true
    }

    /// Capture the word in `slot`. No-op (false) unless it is Moving.
    pub fn capture(&mut self, slot: usize, events: &mut Vec<SessionEvent>) -> bool {
        let Some(word) = self.words.get_mut(slot) else {
            return false;
        };
        if !word.capture(events) {
            return false;
        }
        self.on_word_terminal(slot, events);
        true
    }

    /// Called once the word in `slot` reaches a terminal state:
    /// release the next word if it is still waiting.
    pub fn on_word_terminal(&mut self, slot: usize, events: &mut Vec<SessionEvent>) {
        match self.words.get_mut(slot + 1) {
            Some(next) if next.state() == WordState::Set => {
                next.activate(events);
            }
            _ => log::debug!("lane {}: no word left after slot {}", self.index, slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::FixedSpeed;

    const TRACK: Track = Track {
        field_width: 400.0,
        finish_line: 320.0,
    };

    fn lane(texts: &[&str]) -> Lane {
        Lane::new(0, texts, &mut FixedSpeed(0.5), SpeedRange::default())
    }

    fn states(lane: &Lane) -> Vec<WordState> {
        lane.words().iter().map(|w| w.state()).collect()
    }

    fn moving_count(lane: &Lane) -> usize {
        lane.words().iter().filter(|w| w.is_moving()).count()
    }

    #[test]
    fn handles_carry_lane_and_slot() {
        let lane = Lane::new(3, &["a", "b"], &mut FixedSpeed(0.5), SpeedRange::default());
        assert_eq!(lane.word(1).unwrap().handle(), WordRef::new(3, 1));
    }

    #[test]
    fn activates_first_word_only() {
        let mut lane = lane(&["apple", "banana", "cherry"]);
        let mut events = Vec::new();
        assert!(lane.activate_first_eligible(&mut events));
        assert_eq!(states(&lane), vec![WordState::Moving, WordState::Set, WordState::Set]);
        assert!(!lane.activate_first_eligible(&mut events));
        assert_eq!(moving_count(&lane), 1);
    }

    #[test]
    fn finish_releases_next_word() {
        let mut lane = lane(&["apple", "banana"]);
        let mut events = Vec::new();
        lane.activate_first_eligible(&mut events);
        for _ in 0..16 {
            lane.tick(0.1, TRACK, &mut events);
            assert!(moving_count(&lane) <= 1);
        }
        assert_eq!(states(&lane), vec![WordState::Finished, WordState::Moving]);
        assert_eq!(lane.word(0).unwrap().position(), 320.0);
        assert_eq!(lane.word(1).unwrap().position(), 0.0);
    }

    #[test]
    fn capture_releases_next_word() {
        let mut lane = lane(&["apple", "banana"]);
        let mut events = Vec::new();
        lane.activate_first_eligible(&mut events);
        lane.tick(0.25, TRACK, &mut events);
        assert!(lane.capture(0, &mut events));
        assert_eq!(states(&lane), vec![WordState::Captured, WordState::Moving]);
    }

    #[test]
    fn capture_of_waiting_word_is_ignored() {
        let mut lane = lane(&["apple", "banana"]);
        let mut events = Vec::new();
        lane.activate_first_eligible(&mut events);
        events.clear();
        assert!(!lane.capture(1, &mut events));
        assert!(!lane.capture(7, &mut events));
        assert!(events.is_empty());
        assert_eq!(states(&lane), vec![WordState::Moving, WordState::Set]);
    }

    #[test]
    fn exhausted_lane_goes_idle() {
        let mut lane = lane(&["apple"]);
        let mut events = Vec::new();
        lane.activate_first_eligible(&mut events);
        assert!(lane.has_active_or_pending_word());
        lane.capture(0, &mut events);
        assert!(!lane.has_active_or_pending_word());
        assert!(!lane.tick(0.1, TRACK, &mut events));
        assert!(!lane.activate_first_eligible(&mut events));
    }

    #[test]
    fn words_advance_strictly_in_order() {
        let mut lane = lane(&["a", "b", "c", "d"]);
        let mut events = Vec::new();
        lane.activate_first_eligible(&mut events);
        for _ in 0..100 {
            lane.tick(0.07, TRACK, &mut events);
            let states = states(&lane);
            for i in 1..states.len() {
                if states[i] != WordState::Set {
                    assert!(states[i - 1].is_terminal(), "{:?}", states);
                }
            }
        }
        assert!(lane.words().iter().all(|w| w.state() == WordState::Finished));
    }

    #[test]
    fn empty_lane_is_inert() {
        let mut lane = lane(&[]);
        let mut events = Vec::new();
        assert!(lane.is_empty());
        assert!(!lane.has_active_or_pending_word());
        assert!(!lane.activate_first_eligible(&mut events));
        assert!(!lane.tick(0.1, TRACK, &mut events));
    }
}
