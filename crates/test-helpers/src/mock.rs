//! Port implementations for driving a `TickLoop` in tests.
//!
//! Every mock is a cheap handle over shared state, so a test can keep a clone
//! for inspection after moving the original into the loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use handdrive_engine::{
    ActuatorChannel, ActuatorError, Clock, EngineResult, GestureObservation, ObservationSource,
    StatusLine, StatusSink,
};
use handdrive_protocol::CommandLine;

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Default)]
struct ActuatorState {
    sent: Vec<CommandLine>,
    attempts: usize,
    fail_next: usize,
    fail_always: bool,
}

/// Records every line sent; can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    state: Rc<RefCell<ActuatorState>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An actuator whose every send fails.
    pub fn failing() -> Self {
        let actuator = Self::new();
        actuator.state.borrow_mut().fail_always = true;
        actuator
    }

    /// Fail the next `count` sends, then recover.
    pub fn fail_next(&self, count: usize) {
        self.state.borrow_mut().fail_next = count;
    }

    pub fn sent(&self) -> Vec<CommandLine> {
        self.state.borrow().sent.clone()
    }

    /// Everything sent, concatenated as it would appear on the wire.
    pub fn wire(&self) -> String {
        self.state.borrow().sent.iter().map(CommandLine::encode).collect()
    }

    pub fn attempts(&self) -> usize {
        self.state.borrow().attempts
    }
}

impl ActuatorChannel for RecordingActuator {
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
        let mut state = self.state.borrow_mut();
        state.attempts += 1;
        if state.fail_always {
            return Err(ActuatorError::Disconnected);
        }
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(ActuatorError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock write failure",
            )));
        }
        state.sent.push(*line);
        Ok(())
    }
}

/// Records every status line reported.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    statuses: Rc<RefCell<Vec<StatusLine>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<StatusLine> {
        self.statuses.borrow().clone()
    }

    /// Status lines as the operator would read them.
    pub fn rendered(&self) -> Vec<String> {
        self.statuses.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count_where(&self, predicate: impl Fn(&StatusLine) -> bool) -> usize {
        self.statuses.borrow().iter().filter(|s| predicate(s)).count()
    }
}

impl StatusSink for RecordingSink {
    fn report(&mut self, status: &StatusLine) {
        self.statuses.borrow_mut().push(status.clone());
    }
}

/// Replays a fixed list of observations, optionally advancing a
/// [`ManualClock`] by one frame period before each one after the first.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    items: VecDeque<EngineResult<GestureObservation>>,
    clock: Option<(ManualClock, Duration)>,
    started: bool,
}

impl ScriptedSource {
    pub fn new(items: impl IntoIterator<Item = GestureObservation>) -> Self {
        Self {
            items: items.into_iter().map(Ok).collect(),
            ..Self::default()
        }
    }

    /// Build from unvalidated detector values; out-of-range values become
    /// errors the loop must discard.
    pub fn from_raw(values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self {
            items: values.into_iter().map(GestureObservation::from_raw).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ManualClock, period: Duration) -> Self {
        self.clock = Some((clock, period));
        self
    }
}

impl ObservationSource for ScriptedSource {
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        let item = self.items.pop_front()?;
        if let Some((clock, period)) = &self.clock {
            if self.started {
                clock.advance(*period);
            }
            self.started = true;
        }
        Some(item)
    }
}
