use crate::api::config::LaneDefinitions;
use crate::api::types::WordRef;

/// Commands a host can issue to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Build lanes from word texts (resets a live session first).
    Setup(LaneDefinitions),
    Start,
    Reset,
    /// Tap-to-capture on a specific word.
    Capture(WordRef),
    /// A speech transcript; captures every moving word it names.
    Speak(String),
}

/// A queue of host commands.
/// The host pushes commands as they arrive; the runner drains them at the
/// start of each frame so they never interleave with a tick.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = CommandQueue::new();
        q.push(Command::Start);
        q.push(Command::Capture(WordRef::new(1, 0)));
        assert_eq!(q.len(), 2);
        let commands = q.drain();
        assert_eq!(commands, vec![Command::Start, Command::Capture(WordRef::new(1, 0))]);
        assert!(q.is_empty());
    }
}
