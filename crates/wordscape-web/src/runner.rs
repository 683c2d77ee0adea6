use std::cell::RefCell;
use std::rc::Rc;

use wordscape_engine::bridge::protocol::as_floats;
use wordscape_engine::{
    Clock, Command, CommandQueue, EventRecord, GameConfig, Session, WordRef,
};

/// Wires a session to a host page.
///
/// The host pushes commands whenever input arrives and calls `frame` once
/// per animation frame. Commands are applied at the start of the next frame,
/// so they never interleave with a tick. Events produced during a frame are
/// kept in a flat buffer until the next one starts.
pub struct SessionRunner<C: Clock> {
    session: Session<C>,
    commands: CommandQueue,
    events: Rc<RefCell<Vec<EventRecord>>>,
}

impl<C: Clock> SessionRunner<C> {
    pub fn new(config: GameConfig, clock: C) -> Self {
        Self::from_session(Session::with_clock(config, clock))
    }

    pub fn from_session(mut session: Session<C>) -> Self {
        let events = Rc::new(RefCell::new(Vec::with_capacity(64)));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(EventRecord::from_event(event)));
        Self {
            session,
            commands: CommandQueue::new(),
            events,
        }
    }

    /// Queue a command for the next frame.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one host frame: apply queued commands, then tick if the loop is running.
    pub fn frame(&mut self) {
        self.events.borrow_mut().clear();
        for command in self.commands.drain() {
            self.session.apply(command);
        }
        self.session.frame();
    }

    // ---- Event buffer accessors ----

    /// Copy of this frame's events as flat floats.
    pub fn event_floats(&self) -> Vec<f32> {
        as_floats(&self.events.borrow()).to_vec()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.borrow().as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.borrow().len() as u32
    }

    // ---- Session accessors ----

    pub fn lane_count(&self) -> u32 {
        self.session.lanes().len() as u32
    }

    pub fn lane_len(&self, lane: usize) -> u32 {
        self.session.lanes().get(lane).map_or(0, |l| l.len() as u32)
    }

    pub fn word_text(&self, lane: usize, index: usize) -> Option<String> {
        self.session
            .word(WordRef::new(lane, index))
            .map(|w| w.text().to_string())
    }

    pub fn captured_words(&self) -> &[String] {
        self.session.captured_words()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn field_width(&self) -> f32 {
        self.session.config().field_width
    }

    pub fn finish_line(&self) -> f32 {
        self.session.finish_line()
    }
}
