use crate::api::config::GameConfig;
use crate::api::types::{ListenerId, SessionEvent, WordRef};
use crate::core::lane::Lane;
use crate::core::rng::{Rng, SpeedSampler};
use crate::core::time::{Clock, InstantClock, LoopDriver};
use crate::core::word::{Track, WordMachine};
use crate::input::queue::Command;

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Owns all lanes of one game, the loop driver and the captured-word list.
///
/// Entry points are not synchronized: commands, `tick` and `frame` must be
/// called from one thread, one at a time.
pub struct Session<C: Clock = InstantClock> {
    config: GameConfig,
    track: Track,
    sampler: Box<dyn SpeedSampler>,
    lanes: Vec<Lane>,
    captured_words: Vec<String>,
    driver: LoopDriver<C>,
    set_up: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
    /// Events produced by the current command or tick, flushed at its end.
    pending: Vec<SessionEvent>,
}

impl Session<InstantClock> {
    /// Session timed by the wall clock, with speeds seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, InstantClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        let rng = Rng::new(config.seed);
        Self::with_sampler(config, clock, Box::new(rng))
    }

    pub fn with_sampler(config: GameConfig, clock: C, sampler: Box<dyn SpeedSampler>) -> Self {
        let driver = LoopDriver::new(clock, config.max_frame_delta);
        Self {
            track: Track::from_config(&config),
            config,
            sampler,
            lanes: Vec::new(),
            captured_words: Vec::new(),
            driver,
            set_up: false,
            listeners: Vec::new(),
            next_listener: 1,
            pending: Vec::new(),
        }
    }

    // -- Commands --

    /// Build one lane per inner list, one word per text, all in Set.
    ///
    /// Calling this on a session that is already set up resets it first.
    pub fn setup<L, S>(&mut self, lanes: &[L])
    where
        L: AsRef<[S]>,
        S: AsRef<str>,
    {
        if self.set_up {
            log::info!("setup on a live session, resetting first");
            self.reset();
        }

        let range = self.config.speed_range;
        self.lanes = lanes
            .iter()
            .enumerate()
            .map(|(index, texts)| {
                let texts: &[S] = texts.as_ref();
                Lane::new(index, texts, &mut *self.sampler, range)
            })
            .collect();
        self.set_up = true;

        let words: usize = self.lanes.iter().map(Lane::len).sum();
        log::info!("session set up: {} lanes, {} words", self.lanes.len(), words);
    }

    /// Put the first waiting word of every lane in motion and start the loop.
    /// Returns false (no-op) when no lane has a Set or Moving word.
    pub fn start(&mut self) -> bool {
        if !self.has_active_or_pending_word() {
            log::debug!("start ignored: no words left to play");
            return false;
        }

        for lane in &mut self.lanes {
            lane.activate_first_eligible(&mut self.pending);
        }
        if self.driver.start() {
            log::info!("game loop started");
        }
        self.flush();
        true
    }

    /// Stop the loop and discard all lanes and captured words.
    /// The speed sampler restarts from `config.seed`, so the same setup
    /// after a reset draws the same speeds as a fresh session.
    pub fn reset(&mut self) {
        self.driver.stop();
        self.sampler.reseed(self.config.seed);
        self.lanes.clear();
        self.captured_words.clear();
        self.pending.clear();
        self.set_up = false;
        log::info!("session reset");
    }

    /// Capture the word behind `word`. No-op (false) unless it is Moving.
    pub fn capture(&mut self, word: WordRef) -> bool {
        let captured = self.capture_in_lane(word);
        self.flush();
        captured
    }

    /// Capture every moving word named in a speech transcript.
    ///
    /// Transcript and word texts are compared case-insensitively with
    /// punctuation dropped; a word matches when its text appears as a run of
    /// whole words in the transcript. Returns how many words were captured.
    pub fn capture_spoken(&mut self, transcript: &str) -> usize {
        let transcript = normalize_speech(transcript);
        if transcript.is_empty() {
            return 0;
        }
        let padded = format!(" {} ", transcript);

        let targets: Vec<WordRef> = self
            .lanes
            .iter()
            .filter_map(Lane::moving_word)
            .filter(|w| {
                let text = normalize_speech(w.text());
                !text.is_empty() && padded.contains(&format!(" {} ", text))
            })
            .map(WordMachine::handle)
            .collect();

        let captured = targets.into_iter().filter(|&word| self.capture_in_lane(word)).count();
        self.flush();
        if captured == 0 {
            log::debug!("transcript {:?} matched no moving word", transcript);
        }
        captured
    }

    /// Execute a queued host command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Setup(lanes) => self.setup(lanes.as_slice()),
            Command::Start => {
                self.start();
            }
            Command::Reset => self.reset(),
            Command::Capture(word) => {
                self.capture(word);
            }
            Command::Speak(transcript) => {
                self.capture_spoken(&transcript);
            }
        }
    }

    // -- Loop --

    /// Advance every lane's moving word by `dt` seconds.
    /// Stops the loop once no lane has a word in motion.
    pub fn tick(&mut self, dt: f32) {
        let track = self.track;
        for lane in &mut self.lanes {
            lane.tick(dt, track, &mut self.pending);
        }

        if self.driver.is_running() && !self.lanes.iter().any(Lane::has_moving_word) {
            self.driver.stop();
            log::debug!("game loop stopped: no moving words");
        }
        self.flush();
    }

    /// Run one tick if the loop is running, timed by the session clock.
    /// Call once per host refresh. Returns true if a tick ran.
    pub fn frame(&mut self) -> bool {
        match self.driver.next_delta() {
            Some(dt) => {
                self.tick(dt);
                true
            }
            None => false,
        }
    }

    // -- Listeners --

    /// Register a listener. It receives every event, synchronously, at the
    /// end of the command or tick that produced it.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // -- Queries --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn finish_line(&self) -> f32 {
        self.track.finish_line
    }

    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn word(&self, word: WordRef) -> Option<&WordMachine> {
        self.lanes.get(word.lane)?.word(word.index)
    }

    /// Captured texts in capture order.
    pub fn captured_words(&self) -> &[String] {
        &self.captured_words
    }

    pub fn has_active_or_pending_word(&self) -> bool {
        self.lanes.iter().any(Lane::has_active_or_pending_word)
    }

    fn capture_in_lane(&mut self, word: WordRef) -> bool {
        let Some(lane) = self.lanes.get_mut(word.lane) else {
            return false;
        };
        if !lane.capture(word.index, &mut self.pending) {
            return false;
        }
        if let Some(text) = lane.word(word.index).map(|w| w.text().to_string()) {
            log::debug!("captured {:?}", text);
            self.captured_words.push(text);
        }
        true
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            if let SessionEvent::WordFinished { text, .. } = event {
                log::debug!("word finished: {:?}", text);
            }
            for (_, listener) in &mut self.listeners {
                listener(event);
            }
        }
    }
}

/// Lower-case, drop everything but letters, digits and whitespace, and
/// collapse whitespace runs to single spaces.
fn normalize_speech(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
