//! Gesture debouncing over a sliding window of observations.

use std::collections::VecDeque;

use crate::observation::FingerCount;

/// Sliding window of the most recent finger counts.
///
/// A gesture is stable only when the window is full and every entry agrees.
/// There is no way to append "no hand": the caller resets the window instead,
/// so a hand that drops out for one frame must rebuild a full window.
#[derive(Debug, Clone)]
pub struct GestureStabilizer {
    window: VecDeque<FingerCount>,
    capacity: usize,
}

impl GestureStabilizer {
    /// Create a stabilizer needing `capacity` agreeing frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push one observation and return the stable gesture, if any.
    pub fn observe(&mut self, value: FingerCount) -> Option<FingerCount> {
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(value);
        self.stable()
    }

    /// The stable gesture for the current window contents.
    pub fn stable(&self) -> Option<FingerCount> {
        if !self.is_full() {
            return None;
        }
        let first = *self.window.front()?;
        self.window
            .iter()
            .all(|value| *value == first)
            .then_some(first)
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.window.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn count(n: u8) -> FingerCount {
        FingerCount::saturating(n)
    }

    #[test]
    fn test_unstable_until_full() {
        let mut stabilizer = GestureStabilizer::new(8);
        for _ in 0..7 {
            assert_eq!(stabilizer.observe(count(2)), None);
        }
        assert_eq!(stabilizer.observe(count(2)), Some(count(2)));
    }

    #[test]
    fn test_single_outlier_breaks_window() {
        let mut stabilizer = GestureStabilizer::new(4);
        for value in [1, 1, 3, 1] {
            stabilizer.observe(count(value));
        }
        assert_eq!(stabilizer.stable(), None);

        // the outlier ages out after a full window of agreement
        for _ in 0..2 {
            assert_eq!(stabilizer.observe(count(1)), None);
        }
        assert_eq!(stabilizer.observe(count(1)), Some(count(1)));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut stabilizer = GestureStabilizer::new(3);
        for value in [0, 4, 4, 4] {
            stabilizer.observe(count(value));
        }
        assert_eq!(stabilizer.len(), 3);
        assert_eq!(stabilizer.stable(), Some(count(4)));
    }

    #[test]
    fn test_reset_requires_fresh_window() -> TestResult {
        let mut stabilizer = GestureStabilizer::new(3);
        for _ in 0..3 {
            stabilizer.observe(FingerCount::new(5)?);
        }
        assert!(stabilizer.stable().is_some());

        stabilizer.reset();
        assert!(stabilizer.is_empty());
        assert_eq!(stabilizer.observe(FingerCount::new(5)?), None);
        assert_eq!(stabilizer.observe(FingerCount::new(5)?), None);
        assert_eq!(
            stabilizer.observe(FingerCount::new(5)?),
            Some(FingerCount::new(5)?)
        );
        Ok(())
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut stabilizer = GestureStabilizer::new(0);
        assert_eq!(stabilizer.capacity(), 1);
        assert_eq!(stabilizer.observe(count(3)), Some(count(3)));
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_short_sequences_never_stable(
            capacity in 1usize..=16,
            values in proptest::collection::vec(0u8..=5, 0..16),
        ) {
            let mut stabilizer = GestureStabilizer::new(capacity);
            for (seen, value) in values.into_iter().enumerate() {
                let stable = stabilizer.observe(count(value));
                if seen + 1 < capacity {
                    prop_assert_eq!(stable, None);
                }
            }
        }

        #[test]
        fn prop_full_identical_window_is_stable(capacity in 1usize..=16, value in 0u8..=5) {
            let mut stabilizer = GestureStabilizer::new(capacity);
            let mut last = None;
            for _ in 0..capacity {
                last = stabilizer.observe(count(value));
            }
            prop_assert_eq!(last, Some(count(value)));
        }

        #[test]
        fn prop_any_differing_entry_is_unstable(
            capacity in 2usize..=16,
            value in 0u8..=5,
            offset in 1u8..=5,
            position in 0usize..16,
        ) {
            let other = (value + offset) % 6;
            let position = position % capacity;
            let mut stabilizer = GestureStabilizer::new(capacity);
            let mut last = None;
            for idx in 0..capacity {
                let observed = if idx == position { other } else { value };
                last = stabilizer.observe(count(observed));
            }
            prop_assert_eq!(last, None);
        }
    }
}
