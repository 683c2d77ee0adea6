use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock whose time is pushed by its owner.
/// Clones share the same time, so a host (or test) can keep one handle
/// and hand another to a session.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current time in seconds.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    /// Move time forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Repeating, cancellable tick source.
/// Turns host refresh timestamps into per-tick deltas. Holds no game knowledge.
#[derive(Debug)]
pub struct LoopDriver<C: Clock> {
    clock: C,
    /// Timestamp of the previous tick (or of `start`). `None` while stopped.
    last: Option<f64>,
    max_delta: f32,
}

impl<C: Clock> LoopDriver<C> {
    pub fn new(clock: C, max_delta: f32) -> Self {
        Self {
            clock,
            last: None,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Begin ticking, baselined at the current time.
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self) -> bool {
        if self.last.is_some() {
            return false;
        }
        self.last = Some(self.clock.now());
        true
    }

    /// Cancel future ticks. Idempotent.
    pub fn stop(&mut self) {
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Seconds elapsed since the previous tick, or `None` while stopped.
    /// Clamped to `[0, max_delta]`.
    pub fn next_delta(&mut self) -> Option<f32> {
        let last = self.last?;
        let now = self.clock.now();
        self.last = Some(now);
        let dt = (now - last) as f32;
        if dt.is_finite() {
            Some(dt.max(0.0).min(self.max_delta))
        } else {
            Some(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> (ManualClock, LoopDriver<ManualClock>) {
        let clock = ManualClock::new();
        let driver = LoopDriver::new(clock.clone(), 0.25);
        (clock, driver)
    }

    #[test]
    fn stopped_driver_yields_nothing() {
        let (_, mut driver) = driver();
        assert!(!driver.is_running());
        assert_eq!(driver.next_delta(), None);
    }

    #[test]
    fn first_delta_measured_from_start() {
        let (clock, mut driver) = driver();
        clock.set(100.0);
        assert!(driver.start());
        clock.advance(0.016);
        let dt = driver.next_delta().unwrap();
        assert!((dt - 0.016).abs() < 1e-5, "dt was {}", dt);
    }

    #[test]
    fn start_while_running_is_noop() {
        let (clock, mut driver) = driver();
        driver.start();
        clock.advance(0.1);
        assert!(!driver.start());
        let dt = driver.next_delta().unwrap();
        assert!((dt - 0.1).abs() < 1e-5);
    }

    #[test]
    fn stop_is_idempotent() {
        let (_, mut driver) = driver();
        driver.start();
        driver.stop();
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.next_delta(), None);
    }

    #[test]
    fn restart_rebaselines() {
        let (clock, mut driver) = driver();
        driver.start();
        driver.stop();
        clock.advance(10.0);
        driver.start();
        clock.advance(0.02);
        let dt = driver.next_delta().unwrap();
        assert!((dt - 0.02).abs() < 1e-5);
    }

    #[test]
    fn deltas_are_clamped() {
        let (clock, mut driver) = driver();
        driver.start();
        clock.advance(5.0);
        assert_eq!(driver.next_delta(), Some(0.25));
        clock.set(clock.now() - 1.0);
        assert_eq!(driver.next_delta(), Some(0.0));
    }

    #[test]
    fn zero_delta_when_time_stands_still() {
        let (_, mut driver) = driver();
        driver.start();
        assert_eq!(driver.next_delta(), Some(0.0));
    }
}
