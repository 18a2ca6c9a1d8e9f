use serde::{Deserialize, Serialize};

use super::{
    BpmSegment, ComboSegment, LabelSegment, Segment, SegmentKind, StopSegment,
    TickcountSegment, TimeSignatureSegment, WarpSegment,
};
use crate::error::{Error, Result};

/// All timing segments of a song, each collection ordered by start row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingData {
    pub beat0_offset_seconds: f64,
    pub bpms: Vec<BpmSegment>,
    /// Stops and delays share one collection; `StopSegment::delay` tells them apart.
    pub stops: Vec<StopSegment>,
    pub warps: Vec<WarpSegment>,
    pub time_signatures: Vec<TimeSignatureSegment>,
    pub tickcounts: Vec<TickcountSegment>,
    pub combos: Vec<ComboSegment>,
    pub labels: Vec<LabelSegment>,
}

impl TimingData {
    /// Timing with a single BPM and the required defaults (4/4, 4 ticks, combo 1).
    pub fn with_bpm(bpm: f64) -> Self {
        Self {
            bpms: vec![BpmSegment { start_row: 0, bpm }],
            time_signatures: vec![TimeSignatureSegment {
                start_row: 0,
                numerator: 4,
                denominator: 4,
            }],
            tickcounts: vec![TickcountSegment {
                start_row: 0,
                ticks: 4,
            }],
            combos: vec![ComboSegment {
                start_row: 0,
                combo: 1,
            }],
            ..Default::default()
        }
    }

    /// Stops that halt scrolling after the row's notes.
    pub fn stops_only(&self) -> impl Iterator<Item = &StopSegment> {
        self.stops.iter().filter(|s| !s.delay)
    }

    /// Stops that pause before the row's notes.
    pub fn delays(&self) -> impl Iterator<Item = &StopSegment> {
        self.stops.iter().filter(|s| s.delay)
    }

    /// Check the structural invariants required for serialization.
    ///
    /// TimeSignature, Tickcount and Combo must be non-empty, and every
    /// collection must be sorted by start row.
    pub fn validate(&self) -> Result<()> {
        if self.time_signatures.is_empty() {
            return Err(Error::EmptySegments(SegmentKind::TimeSignature));
        }
        if self.tickcounts.is_empty() {
            return Err(Error::EmptySegments(SegmentKind::Tickcount));
        }
        if self.combos.is_empty() {
            return Err(Error::EmptySegments(SegmentKind::Combo));
        }

        check_sorted(&self.bpms, SegmentKind::Bpm)?;
        check_sorted(&self.stops, SegmentKind::Stop)?;
        check_sorted(&self.warps, SegmentKind::Warp)?;
        check_sorted(&self.time_signatures, SegmentKind::TimeSignature)?;
        check_sorted(&self.tickcounts, SegmentKind::Tickcount)?;
        check_sorted(&self.combos, SegmentKind::Combo)?;
        check_sorted(&self.labels, SegmentKind::Label)?;
        Ok(())
    }
}

fn check_sorted<S: Segment>(segments: &[S], kind: SegmentKind) -> Result<()> {
    if segments
        .windows(2)
        .all(|pair| pair[0].start_row() <= pair[1].start_row())
    {
        Ok(())
    } else {
        Err(Error::UnsortedSegments(kind))
    }
}
