use crate::api::config::{GameConfig, SpeedRange};
use crate::api::types::{SessionEvent, WordRef, WordState};
use crate::core::rng::SpeedSampler;

/// Immutable word data: its text and the speed it travels at.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntity {
    text: String,
    /// Fraction of the field width covered per second.
    speed_factor: f32,
}

impl WordEntity {
    pub fn new(text: impl Into<String>, speed_factor: f32) -> Self {
        Self {
            text: text.into(),
            speed_factor,
        }
    }

    /// Create a word with a speed factor drawn from `range`.
    pub fn sampled(
        text: impl Into<String>,
        sampler: &mut dyn SpeedSampler,
        range: SpeedRange,
    ) -> Self {
        Self::new(text, sampler.sample(range))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }
}

/// Geometry a word travels across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub field_width: f32,
    pub finish_line: f32,
}

impl Track {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            field_width: config.field_width,
            finish_line: config.finish_line(),
        }
    }
}

/// Runtime state of one word: Set → Moving → Finished | Captured.
#[derive(Debug, Clone)]
pub struct WordMachine {
    entity: WordEntity,
    handle: WordRef,
    state: WordState,
    position: f32,
}

impl WordMachine {
    pub fn new(entity: WordEntity, handle: WordRef) -> Self {
        Self {
            entity,
            handle,
            state: WordState::Set,
            position: 0.0,
        }
    }

    pub fn entity(&self) -> &WordEntity {
        &self.entity
    }

    pub fn text(&self) -> &str {
        self.entity.text()
    }

    pub fn handle(&self) -> WordRef {
        self.handle
    }

    pub fn state(&self) -> WordState {
        self.state
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.state == WordState::Moving
    }

    fn set_state(&mut self, state: WordState, events: &mut Vec<SessionEvent>) {
        self.state = state;
        events.push(SessionEvent::StateChanged {
            word: self.handle,
            state,
        });
    }

    /// Set → Moving. Returns false for any other starting state.
    pub fn activate(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if self.state != WordState::Set {
            return false;
        }
        self.set_state(WordState::Moving, events);
        true
    }

    /// Advance a moving word by `dt` seconds.
    /// Returns `Some(WordState::Finished)` if this tick carried it over the finish line.
    pub fn advance(
        &mut self,
        dt: f32,
        track: Track,
        events: &mut Vec<SessionEvent>,
    ) -> Option<WordState> {
        if self.state != WordState::Moving || dt.is_nan() || dt <= 0.0 {
            return None;
        }

        self.position += self.entity.speed_factor * track.field_width * dt;
        let finished = self.position >= track.finish_line;
        if finished {
            self.position = track.finish_line;
        }
        events.push(SessionEvent::PositionChanged {
            word: self.handle,
            position: self.position,
        });

        if !finished {
            return None;
        }
        self.set_state(WordState::Finished, events);
        events.push(SessionEvent::WordFinished {
            word: self.handle,
            text: self.entity.text.clone(),
        });
        Some(WordState::Finished)
    }

    /// Moving → Captured, freezing the position where it is.
    /// A no-op returning false in any other state.
    pub fn capture(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if self.state != WordState::Moving {
            return false;
        }
        self.set_state(WordState::Captured, events);
        events.push(SessionEvent::WordCaptured {
            word: self.handle,
            text: self.entity.text.clone(),
        });
        true
    }
}
