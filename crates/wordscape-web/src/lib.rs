//! Browser bridge for the Wordscape simulation.
//!
//! A page calls `wordscape_init` once, forwards taps and speech transcripts
//! as commands, and calls `wordscape_frame` from `requestAnimationFrame`.
//! After each frame it reads the event buffer (see
//! `wordscape_engine::bridge::protocol`) to move and recolor its word boxes.

pub mod runner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wordscape_engine::{default_lanes, lanes_from_json, Clock, Command, GameConfig, WordRef};

pub use runner::SessionRunner;

/// Page clock backed by `performance.now()`, which is monotonic.
/// Falls back to `Date.now()` where no window performance timer exists.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|window| window.performance());
        if performance.is_none() {
            log::warn!("performance timer unavailable, falling back to Date.now()");
        }
        Self { performance }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        let millis = match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        };
        millis / 1000.0
    }
}

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner<PerformanceClock>>> = RefCell::new(None);
}

fn with_runner<R: Default>(f: impl FnOnce(&mut SessionRunner<PerformanceClock>) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("wordscape not initialized; call wordscape_init() first");
            R::default()
        }
    })
}

/// Create the session. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn wordscape_init(config_json: &str) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("wordscape: logger already installed"));
    }

    let config = if config_json.trim().is_empty() {
        GameConfig::default()
    } else {
        GameConfig::from_json(config_json).unwrap_or_else(|err| {
            log::error!("invalid config, using defaults: {}", err);
            GameConfig::default()
        })
    };

    let runner = SessionRunner::new(config, PerformanceClock::new());
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("wordscape: initialized");
}

/// Queue lane setup from a JSON array of arrays of words.
#[wasm_bindgen]
pub fn wordscape_setup(lanes_json: &str) {
    match lanes_from_json(lanes_json) {
        Ok(lanes) => with_runner(|r| r.push(Command::Setup(lanes))),
        Err(err) => log::error!("invalid lane definitions: {}", err),
    }
}

/// Queue setup with the stock word set.
#[wasm_bindgen]
pub fn wordscape_setup_default() {
    with_runner(|r| r.push(Command::Setup(default_lanes())));
}

#[wasm_bindgen]
pub fn wordscape_start() {
    with_runner(|r| r.push(Command::Start));
}

#[wasm_bindgen]
pub fn wordscape_reset() {
    with_runner(|r| r.push(Command::Reset));
}

#[wasm_bindgen]
pub fn wordscape_capture(lane: u32, index: u32) {
    with_runner(|r| r.push(Command::Capture(WordRef::new(lane as usize, index as usize))));
}

/// Forward a speech-recognition transcript.
#[wasm_bindgen]
pub fn wordscape_speak(transcript: &str) {
    let transcript = transcript.to_string();
    with_runner(|r| r.push(Command::Speak(transcript)));
}

#[wasm_bindgen]
pub fn wordscape_frame() {
    with_runner(|r| r.frame());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_lane_count() -> u32 {
    with_runner(|r| r.lane_count())
}

#[wasm_bindgen]
pub fn get_lane_len(lane: u32) -> u32 {
    with_runner(|r| r.lane_len(lane as usize))
}

#[wasm_bindgen]
pub fn get_word_text(lane: u32, index: u32) -> Option<String> {
    with_runner(|r| r.word_text(lane as usize, index as usize))
}

#[wasm_bindgen]
pub fn get_captured_words() -> js_sys::Array {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(r) => r
            .captured_words()
            .iter()
            .map(|word| JsValue::from_str(word))
            .collect(),
        None => js_sys::Array::new(),
    })
}

#[wasm_bindgen]
pub fn get_field_width() -> f32 {
    with_runner(|r| r.field_width())
}

#[wasm_bindgen]
pub fn get_finish_line() -> f32 {
    with_runner(|r| r.finish_line())
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    with_runner(|r| r.is_running())
}
