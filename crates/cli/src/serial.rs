//! Serial link to the motor controller.

use std::thread;
use std::time::Duration;

use handdrive_engine::LineWriter;
use serialport::SerialPort;
use tracing::info;

use crate::error::CliError;

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD: u32 = 115_200;

/// Write timeout on the port; the controller never answers.
const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

pub type SerialActuator = LineWriter<Box<dyn SerialPort>>;

/// Open `path` at `baud`, then wait `reset_wait` for boards that reboot when
/// the port opens.
pub fn open(path: &str, baud: u32, reset_wait: Duration) -> Result<SerialActuator, CliError> {
    let port = serialport::new(path, baud)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(|err| CliError::Serial(format!("failed to open {path} at {baud} baud: {err}")))?;
    info!(path, baud, "serial port open");

    if !reset_wait.is_zero() {
        info!(wait_ms = reset_wait.as_millis(), "waiting for controller reset");
        thread::sleep(reset_wait);
    }
    Ok(LineWriter::new(port))
}
