//! Port traits for the tick loop boundaries.
//!
//! The session itself is pure. These traits describe everything the loop
//! needs from the outside world: where observations come from, what time it
//! is, where command lines go and where status lines are shown. Real
//! implementations live in the binary; tests plug in recording fakes.

use std::io::Write;
use std::time::Instant;

use handdrive_protocol::CommandLine;

use crate::error::{ActuatorError, EngineResult};
use crate::observation::GestureObservation;
use crate::status::StatusLine;

/// Pose detector output, one item per tick.
pub trait ObservationSource {
    /// Next observation.
    ///
    /// `None` means the source is exhausted and the loop should stop. An
    /// `Err` is a single bad observation; the loop treats it as no hand and
    /// keeps going.
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>>;
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outbound command channel to the motor controller.
///
/// Sends are fire-and-forget: nothing is read back from the controller.
pub trait ActuatorChannel {
    /// Transmit one command line.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError`] if the line could not be written.
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError>;
}

/// Operator-facing status output.
pub trait StatusSink {
    fn report(&mut self, status: &StatusLine);
}

impl<T: ObservationSource + ?Sized> ObservationSource for Box<T> {
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        (**self).next_observation()
    }
}

impl<T: ObservationSource + ?Sized> ObservationSource for &mut T {
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        (**self).next_observation()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: ActuatorChannel + ?Sized> ActuatorChannel for Box<T> {
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
        (**self).send(line)
    }
}

impl<T: ActuatorChannel + ?Sized> ActuatorChannel for &mut T {
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
        (**self).send(line)
    }
}

impl<T: StatusSink + ?Sized> StatusSink for Box<T> {
    fn report(&mut self, status: &StatusLine) {
        (**self).report(status);
    }
}

impl<T: StatusSink + ?Sized> StatusSink for &mut T {
    fn report(&mut self, status: &StatusLine) {
        (**self).report(status);
    }
}

/// Any iterator of observations is a source.
impl<I> ObservationSource for std::iter::Fuse<I>
where
    I: Iterator<Item = EngineResult<GestureObservation>>,
{
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        self.next()
    }
}

/// Actuator that writes encoded lines to any [`Write`] and flushes each one.
///
/// Used for serial ports and for dry runs on stdout.
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    inner: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ActuatorChannel for LineWriter<W> {
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
        self.inner.write_all(line.encode().as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}
