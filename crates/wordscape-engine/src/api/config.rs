use serde::{Deserialize, Serialize};

/// Slowest speed factor a word can be assigned (fraction of field width per second).
pub const SPEED_FACTOR_MIN: f32 = 0.2;
/// Fastest speed factor a word can be assigned (fraction of field width per second).
pub const SPEED_FACTOR_MAX: f32 = 0.8;

/// Width of the playing field in game units.
pub const DEFAULT_FIELD_WIDTH: f32 = 400.0;
/// Width reserved for a rendered word box. The finish line sits this far
/// before the right edge of the field.
pub const DEFAULT_WORD_BOX_WIDTH: f32 = 80.0;
/// Upper bound on a single frame delta, in seconds.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.25;

/// Closed interval `[min, max]` that word speed factors are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Lower bound, tolerating a reversed range.
    pub fn low(&self) -> f32 {
        self.min.min(self.max)
    }

    /// Upper bound, tolerating a reversed range.
    pub fn high(&self) -> f32 {
        self.min.max(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.low() && value <= self.high()
    }

    /// Clamp `value` into the range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.low()).min(self.high())
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(SPEED_FACTOR_MIN, SPEED_FACTOR_MAX)
    }
}

/// Tunables for a game session, supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in game units.
    pub field_width: f32,
    /// Rendered width reserved for one word.
    pub word_box_width: f32,
    /// Range speed factors are sampled from.
    pub speed_range: SpeedRange,
    /// Largest delta (seconds) a single frame may advance the simulation by.
    pub max_frame_delta: f32,
    /// Seed for the speed sampler.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            word_box_width: DEFAULT_WORD_BOX_WIDTH,
            speed_range: SpeedRange::default(),
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Position at which a moving word is considered finished.
    pub fn finish_line(&self) -> f32 {
        (self.field_width - self.word_box_width).max(0.0)
    }
}

/// Word texts for each lane, in activation order.
pub type LaneDefinitions = Vec<Vec<String>>;

/// Parse lane definitions from a JSON array of arrays of strings.
pub fn lanes_from_json(json: &str) -> Result<LaneDefinitions, serde_json::Error> {
    serde_json::from_str(json)
}

/// The stock four-lane word set.
pub fn default_lanes() -> LaneDefinitions {
    [
        ["apple", "banana", "cherry", "date"],
        ["fig", "elderberry", "grape", "honeydew"],
        ["kiwi", "lemon", "mango", "nectarine"],
        ["papaya", "raspberry", "orange", "quince"],
    ]
    .iter()
    .map(|lane| lane.iter().map(|w| w.to_string()).collect::<Vec<_>>())
    .collect()
}
