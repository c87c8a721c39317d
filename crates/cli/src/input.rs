//! Observation input: one detector result per line.
//!
//! Accepted forms:
//!
//! - `none`, `-` or an empty line: no hand in frame
//! - an integer: the detector's finger count
//! - a JSON object `{"landmarks": [[x, y, z], ...]}` with 21 hand landmarks,
//!   counted here; `{"landmarks": null}` or `{}` means no hand

use std::io::BufRead;

use handdrive_engine::{
    EngineError, EngineResult, GestureObservation, HandLandmarks, ObservationSource,
};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LandmarkFrame {
    #[serde(default)]
    landmarks: Option<Vec<[f32; 3]>>,
}

/// Parse one observation line.
pub fn parse_observation(line: &str) -> EngineResult<GestureObservation> {
    let line = line.trim();
    match line {
        "" | "-" => return Ok(GestureObservation::NoHand),
        other if other.eq_ignore_ascii_case("none") => return Ok(GestureObservation::NoHand),
        _ => {}
    }

    if line.starts_with('{') {
        let frame: LandmarkFrame = serde_json::from_str(line)
            .map_err(|err| EngineError::malformed_observation(format!("{line:?}: {err}")))?;
        return match frame.landmarks {
            None => Ok(GestureObservation::NoHand),
            Some(points) => {
                let hand = HandLandmarks::from_points(&points)?;
                Ok(GestureObservation::Fingers(hand.count_extended()))
            }
        };
    }

    let raw: i64 = line
        .parse()
        .map_err(|_parse| EngineError::malformed_observation(format!("{line:?} is not a finger count")))?;
    GestureObservation::from_raw(Some(raw))
}

/// Observation source over any line-oriented reader.
///
/// Ends at EOF. A read error is logged and also ends the stream; a line that
/// is not UTF-8 is one malformed observation.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> ObservationSource for LineSource<R> {
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                Some(match std::str::from_utf8(&self.buf) {
                    Ok(line) => parse_observation(line.trim_end()),
                    Err(err) => Err(EngineError::malformed_observation(format!(
                        "line {}: {err}",
                        self.line_no
                    ))),
                })
            }
            Err(err) => {
                error!(line = self.line_no + 1, error = %err, "failed to read observation");
                None
            }
        }
    }
}
