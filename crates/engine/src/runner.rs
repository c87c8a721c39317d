//! Tick loop: wires a [`Session`] to its ports.

use serde::Serialize;
use tracing::{error, warn};

use crate::observation::GestureObservation;
use crate::ports::{ActuatorChannel, Clock, ObservationSource, StatusSink};
use crate::session::{Session, TickOutcome};
use crate::status::StatusLine;

/// Counters for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub invalid_observations: u64,
    pub commands_sent: u64,
    pub send_failures: u64,
    pub transitions: u64,
}

impl RunStats {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks = self.ticks.saturating_add(1);
        if outcome.transition.is_some() {
            self.transitions = self.transitions.saturating_add(1);
        }
    }
}

/// Drives a session from an observation source until it runs dry.
pub struct TickLoop<S, C, A, K> {
    session: Session,
    source: S,
    clock: C,
    actuator: A,
    sink: K,
    stats: RunStats,
}

impl<S, C, A, K> TickLoop<S, C, A, K>
where
    S: ObservationSource,
    C: Clock,
    A: ActuatorChannel,
    K: StatusSink,
{
    pub fn new(session: Session, source: S, clock: C, actuator: A, sink: K) -> Self {
        Self {
            session,
            source,
            clock,
            actuator,
            sink,
            stats: RunStats::default(),
        }
    }

    /// Process one observation. Returns `None` once the source is exhausted.
    ///
    /// The command line goes out before statuses are reported. A failed send
    /// is logged, reported as an extra status line and not retried.
    pub fn run_once(&mut self) -> Option<TickOutcome> {
        let observation = match self.source.next_observation()? {
            Ok(observation) => observation,
            Err(err) => {
                warn!(error = %err, "discarding invalid observation");
                self.stats.invalid_observations = self.stats.invalid_observations.saturating_add(1);
                GestureObservation::NoHand
            }
        };

        let now = self.clock.now();
        let outcome = self.session.tick(observation, now);
        self.stats.record(&outcome);

        let failure = outcome.command.and_then(|line| match self.actuator.send(&line) {
            Ok(()) => {
                self.stats.commands_sent = self.stats.commands_sent.saturating_add(1);
                None
            }
            Err(err) => {
                error!(%line, error = %err, "failed to send command");
                self.stats.send_failures = self.stats.send_failures.saturating_add(1);
                Some(StatusLine::ActuatorFailure {
                    line,
                    reason: err.to_string(),
                })
            }
        });

        for status in &outcome.statuses {
            self.sink.report(status);
        }
        if let Some(failure) = failure {
            self.sink.report(&failure);
        }

        Some(outcome)
    }

    /// Run until the source is exhausted.
    pub fn run(&mut self) -> RunStats {
        while self.run_once().is_some() {}
        self.stats
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_parts(self) -> (Session, S, C, A, K) {
        (self.session, self.source, self.clock, self.actuator, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    use handdrive_protocol::CommandLine;

    use super::*;
    use crate::config::GestureConfig;
    use crate::error::{ActuatorError, EngineResult};
    use crate::observation::FingerCount;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    struct StepClock {
        now: Cell<Instant>,
        step: Duration,
    }

    impl Clock for StepClock {
        fn now(&self) -> Instant {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }
    }

    #[derive(Default)]
    struct Recorder {
        sent: Vec<CommandLine>,
        fail: bool,
    }

    impl ActuatorChannel for Recorder {
        fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
            if self.fail {
                return Err(ActuatorError::Disconnected);
            }
            self.sent.push(*line);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Statuses(Vec<StatusLine>);

    impl StatusSink for Statuses {
        fn report(&mut self, status: &StatusLine) {
            self.0.push(status.clone());
        }
    }

    fn fast_config() -> EngineResult<GestureConfig> {
        GestureConfig::builder()
            .stable_frames_required(2)
            .trigger_hold(Duration::from_millis(300))
            .selection_delay(Duration::from_millis(200))
            .build()
    }

    /// fist, then two fingers, then forward for a while
    fn script() -> Vec<EngineResult<GestureObservation>> {
        let mut items = Vec::new();
        for (value, frames) in [(0u8, 6), (2, 6), (1, 8)] {
            for _ in 0..frames {
                items.push(Ok(GestureObservation::Fingers(FingerCount::saturating(value))));
            }
        }
        items
    }

    fn clock() -> StepClock {
        StepClock {
            now: Cell::new(Instant::now()),
            step: Duration::from_millis(100),
        }
    }

    #[test]
    fn test_run_sends_commands_and_counts() -> TestResult {
        let session = Session::new(fast_config()?)?;
        let mut tick_loop = TickLoop::new(
            session,
            script().into_iter().fuse(),
            clock(),
            Recorder::default(),
            Statuses::default(),
        );
        let stats = tick_loop.run();
        assert_eq!(stats.ticks, 20);
        assert_eq!(stats.transitions, 2);
        assert!(stats.commands_sent > 0);
        assert_eq!(stats.send_failures, 0);

        let (session, _, _, actuator, sink) = tick_loop.into_parts();
        assert_eq!(session.selected_motor().map(u8::from), Some(2));
        assert!(actuator.sent.iter().any(|line| line.encode() == "2,1\n"));
        assert_eq!(sink.0.first(), Some(&StatusLine::EnteredSelection));
        Ok(())
    }

    #[test]
    fn test_send_failure_is_reported_and_loop_continues() -> TestResult {
        let session = Session::new(fast_config()?)?;
        let actuator = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut tick_loop = TickLoop::new(
            session,
            script().into_iter().fuse(),
            clock(),
            actuator,
            Statuses::default(),
        );
        let stats = tick_loop.run();
        assert_eq!(stats.ticks, 20);
        assert_eq!(stats.commands_sent, 0);
        assert!(stats.send_failures > 0);

        let (_, _, _, _, sink) = tick_loop.into_parts();
        assert!(sink.0.iter().any(StatusLine::is_error));
        Ok(())
    }

    #[test]
    fn test_invalid_observations_are_counted() -> TestResult {
        let session = Session::new(fast_config()?)?;
        let items = vec![
            GestureObservation::from_raw(Some(-3)),
            Ok(GestureObservation::NoHand),
            GestureObservation::from_raw(Some(11)),
        ];
        let mut tick_loop = TickLoop::new(
            session,
            items.into_iter().fuse(),
            clock(),
            Recorder::default(),
            Statuses::default(),
        );
        let stats = tick_loop.run();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.invalid_observations, 2);
        Ok(())
    }
}
