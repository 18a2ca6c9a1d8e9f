//! Segment timeline types.
//!
//! This module contains the time-indexed events attached to a song:
//! - `BpmSegment`, `StopSegment`, `WarpSegment`, `TimeSignatureSegment`,
//!   `TickcountSegment`, `ComboSegment`, `LabelSegment`
//! - `TimingData` - the per-song aggregate of all segment collections
//! - Row/beat conversion helpers

mod segment;
mod timing_data;

pub use segment::*;
pub use timing_data::*;

use crate::config::format::ROWS_PER_BEAT;

/// Convert a note row to its beat.
pub fn row_to_beat(row: i32) -> f64 {
    f64::from(row) / f64::from(ROWS_PER_BEAT)
}

/// Convert a beat to the nearest note row.
pub fn beat_to_row(beat: f64) -> i32 {
    (beat * f64::from(ROWS_PER_BEAT)).round() as i32
}
