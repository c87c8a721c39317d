//! Assertion macros for command and status streams.

/// Assert that no outcome in a slice of `TickOutcome` carries a command.
#[macro_export]
macro_rules! assert_nothing_sent {
    ($outcomes:expr $(,)?) => {{
        let outcomes = &$outcomes;
        if let Some((idx, outcome)) = outcomes
            .iter()
            .enumerate()
            .find(|(_, outcome)| outcome.command.is_some())
        {
            panic!(
                "assertion failed: expected no commands, tick {} sent {:?}",
                idx, outcome.command
            );
        }
    }};
}

/// Assert that some status line matches a pattern.
///
/// ```rust,ignore
/// assert_status!(sink.statuses(), StatusLine::MotorSelected { .. });
/// ```
#[macro_export]
macro_rules! assert_status {
    ($statuses:expr, $pattern:pat $(,)?) => {{
        let statuses = &$statuses;
        if !statuses.iter().any(|status| matches!(status, $pattern)) {
            panic!(
                "assertion failed: no status matches `{}`\n  statuses: {:?}",
                stringify!($pattern),
                statuses
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_status() {
        let statuses = vec![Some(1), None];
        assert_status!(statuses, Some(1));
    }
}
