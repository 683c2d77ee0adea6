pub mod api;
pub mod bridge;
pub mod core;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{
    default_lanes, lanes_from_json, GameConfig, LaneDefinitions, SpeedRange, SPEED_FACTOR_MAX,
    SPEED_FACTOR_MIN,
};
pub use api::types::{ListenerId, SessionEvent, WordRef, WordState};
pub use bridge::protocol::{EventRecord, EVENT_FLOATS};
pub use crate::core::lane::Lane;
pub use crate::core::rng::{FixedSpeed, Rng, SpeedSampler};
pub use crate::core::session::Session;
pub use crate::core::time::{Clock, InstantClock, LoopDriver, ManualClock};
pub use crate::core::word::{Track, WordEntity, WordMachine};
pub use input::queue::{Command, CommandQueue};
