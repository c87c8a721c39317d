//! Log output of the engine, checked with `tracing-test`.

use std::time::{Duration, Instant};

use handdrive_engine::{Session, TickLoop};
use handdrive_test_helpers::prelude::*;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_transitions_are_logged() -> TestResult {
    let config = fast_config();
    let script = ObservationScript::new(Duration::from_millis(100))
        .trigger(fist(), &config)
        .trigger(fingers(4), &config);
    let mut session = Session::new(config)?;
    script.drive(&mut session, Instant::now());

    assert!(logs_contain("entered selection mode"));
    assert!(logs_contain("motor selected"));
    Ok(())
}

#[test]
#[traced_test]
fn test_invalid_observation_is_warned() -> TestResult {
    let mut session = Session::new(fast_config())?;
    session.tick_raw(Some(42), Instant::now());
    assert!(logs_contain("discarding invalid observation"));
    Ok(())
}

#[test]
#[traced_test]
fn test_send_failure_is_logged_as_error() -> TestResult {
    let config = fast_config();
    let period = Duration::from_millis(100);
    let script = ObservationScript::new(period)
        .trigger(fist(), &config)
        .trigger(fingers(2), &config)
        .hold(fingers(2), Duration::from_millis(500));

    let clock = ManualClock::new();
    let mut tick_loop = TickLoop::new(
        Session::new(config)?,
        ScriptedSource::new(script.into_frames()).with_clock(clock.clone(), period),
        clock,
        RecordingActuator::failing(),
        RecordingSink::new(),
    );
    let stats = tick_loop.run();

    assert!(stats.send_failures > 0);
    assert!(logs_contain("failed to send command"));
    assert!(logs_contain("ERROR"));
    Ok(())
}
