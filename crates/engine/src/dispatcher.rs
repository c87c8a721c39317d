//! Command selection and status throttling for the DIRECTION state.

use std::time::{Duration, Instant};

use handdrive_protocol::{CommandLine, MotorCommand};
use tracing::debug;

use crate::observation::FingerCount;
use crate::state_machine::{ControlState, ControlStateMachine};
use crate::status::StatusLine;

/// Rate limiter for direction status lines.
///
/// The first call always passes; afterwards a line passes only when strictly
/// more than `interval` has elapsed since the last one that did.
#[derive(Debug, Clone)]
pub struct StatusThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl StatusThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) > self.interval);
        if due {
            self.last = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// What the dispatcher produced for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub command: Option<CommandLine>,
    pub status: Option<StatusLine>,
}

#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    selection_delay: Duration,
    throttle: StatusThrottle,
}

impl CommandDispatcher {
    pub fn new(selection_delay: Duration, console_update_interval: Duration) -> Self {
        Self {
            selection_delay,
            throttle: StatusThrottle::new(console_update_interval),
        }
    }

    /// Direction command for a stable gesture.
    pub fn command_for(stable: Option<FingerCount>) -> MotorCommand {
        match stable.map(FingerCount::get) {
            Some(1) => MotorCommand::Forward,
            Some(2) => MotorCommand::Backward,
            Some(0) => MotorCommand::Stop,
            _ => MotorCommand::Idle,
        }
    }

    /// Produce this tick's command and status, if any.
    ///
    /// Only active in DIRECTION with a selected motor. During the settle
    /// window a wait status is returned and nothing is sent.
    pub fn dispatch(
        &mut self,
        machine: &ControlStateMachine,
        stable: Option<FingerCount>,
        now: Instant,
    ) -> DispatchOutcome {
        if machine.state() != ControlState::Direction {
            return DispatchOutcome::default();
        }
        let (Some(motor), Some(selected_at)) = (machine.selected_motor(), machine.selection_time())
        else {
            return DispatchOutcome::default();
        };

        let elapsed = now.saturating_duration_since(selected_at);
        if elapsed < self.selection_delay {
            return DispatchOutcome {
                command: None,
                status: Some(StatusLine::Waiting {
                    motor,
                    remaining: self.selection_delay.saturating_sub(elapsed),
                }),
            };
        }

        let command = Self::command_for(stable);
        let line = CommandLine::new(motor, command);
        debug!(%line, "dispatching command");

        let status = self
            .throttle
            .ready(now)
            .then_some(StatusLine::Direction { motor, command });
        DispatchOutcome {
            command: Some(line),
            status,
        }
    }

    /// Forget the last status time so the next direction line is shown.
    pub fn reset_throttle(&mut self) {
        self.throttle.reset();
    }

    pub fn selection_delay(&self) -> Duration {
        self.selection_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handdrive_protocol::MotorId;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const HOLD: Duration = Duration::from_secs(5);
    const DELAY: Duration = Duration::from_secs(2);
    const INTERVAL: Duration = Duration::from_millis(500);

    fn count(n: u8) -> FingerCount {
        FingerCount::saturating(n)
    }

    fn selected(motor: u8, at: Instant) -> ControlStateMachine {
        let mut machine = ControlStateMachine::new(HOLD);
        machine.evaluate(Some(FingerCount::FIST), HOLD, at);
        machine.evaluate(Some(count(motor)), HOLD, at);
        machine
    }

    #[test]
    fn test_command_mapping() {
        assert_eq!(CommandDispatcher::command_for(Some(count(1))), MotorCommand::Forward);
        assert_eq!(CommandDispatcher::command_for(Some(count(2))), MotorCommand::Backward);
        assert_eq!(CommandDispatcher::command_for(Some(count(0))), MotorCommand::Stop);
        assert_eq!(CommandDispatcher::command_for(Some(count(4))), MotorCommand::Idle);
        assert_eq!(CommandDispatcher::command_for(None), MotorCommand::Idle);
    }

    #[test]
    fn test_inactive_outside_direction() {
        let mut dispatcher = CommandDispatcher::new(DELAY, INTERVAL);
        let machine = ControlStateMachine::new(HOLD);
        let outcome = dispatcher.dispatch(&machine, Some(count(1)), Instant::now());
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[test]
    fn test_settle_window_sends_nothing() -> TestResult {
        let t0 = Instant::now();
        let machine = selected(3, t0);
        let mut dispatcher = CommandDispatcher::new(DELAY, INTERVAL);

        let outcome = dispatcher.dispatch(&machine, Some(count(1)), t0 + Duration::from_millis(700));
        assert_eq!(outcome.command, None);
        assert_eq!(
            outcome.status,
            Some(StatusLine::Waiting {
                motor: MotorId::new(3)?,
                remaining: Duration::from_millis(1300),
            })
        );
        Ok(())
    }

    #[test]
    fn test_command_sent_once_delay_elapsed() -> TestResult {
        let t0 = Instant::now();
        let machine = selected(3, t0);
        let mut dispatcher = CommandDispatcher::new(DELAY, INTERVAL);

        let outcome = dispatcher.dispatch(&machine, Some(count(1)), t0 + DELAY);
        let line = outcome.command.ok_or("expected a command at the delay boundary")?;
        assert_eq!(line.encode(), "3,1\n");
        assert_eq!(
            outcome.status,
            Some(StatusLine::Direction {
                motor: MotorId::new(3)?,
                command: MotorCommand::Forward,
            })
        );
        Ok(())
    }

    #[test]
    fn test_status_is_throttled_but_commands_are_not() {
        let t0 = Instant::now();
        let machine = selected(2, t0);
        let mut dispatcher = CommandDispatcher::new(DELAY, INTERVAL);

        let mut commands = 0;
        let mut statuses = 0;
        // 100ms ticks over one second after the settle window
        for step in 0..10u32 {
            let now = t0 + DELAY + Duration::from_millis(100) * step;
            let outcome = dispatcher.dispatch(&machine, Some(count(2)), now);
            commands += usize::from(outcome.command.is_some());
            statuses += usize::from(outcome.status.is_some());
        }
        assert_eq!(commands, 10);
        // t=0 and t=600ms pass; t=500ms is not strictly past the interval
        assert_eq!(statuses, 2);
    }

    #[test]
    fn test_throttle_strictly_greater() {
        let t0 = Instant::now();
        let mut throttle = StatusThrottle::new(INTERVAL);
        assert!(throttle.ready(t0));
        assert!(!throttle.ready(t0 + INTERVAL));
        assert!(throttle.ready(t0 + INTERVAL + Duration::from_millis(1)));
        throttle.reset();
        assert!(throttle.ready(t0));
    }
}
