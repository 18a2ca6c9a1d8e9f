use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use super::row_to_beat;

/// Kinds of timing segments, named after their SSC tags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
pub enum SegmentKind {
    #[strum(serialize = "BPM")]
    Bpm,
    Stop,
    Delay,
    Warp,
    TimeSignature,
    Tickcount,
    Combo,
    Label,
}

impl SegmentKind {
    /// Tag the kind is stored under in an SSC file.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bpm => "BPMS",
            Self::Stop => "STOPS",
            Self::Delay => "DELAYS",
            Self::Warp => "WARPS",
            Self::TimeSignature => "TIMESIGNATURES",
            Self::Tickcount => "TICKCOUNTS",
            Self::Combo => "COMBOS",
            Self::Label => "LABELS",
        }
    }

    /// Whether a timeline must always hold at least one segment of this kind.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::TimeSignature | Self::Tickcount | Self::Combo)
    }
}

/// Common access to a segment's position.
pub trait Segment {
    fn start_row(&self) -> i32;

    fn beat(&self) -> f64 {
        row_to_beat(self.start_row())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpmSegment {
    pub start_row: i32,
    pub bpm: f64,
}

/// A stop or, when `delay` is set, a delay (pause before the row's notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSegment {
    pub start_row: i32,
    pub seconds: f64,
    #[serde(default)]
    pub delay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpSegment {
    pub start_row: i32,
    pub end_beat: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignatureSegment {
    pub start_row: i32,
    pub numerator: i32,
    pub denominator: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickcountSegment {
    pub start_row: i32,
    pub ticks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboSegment {
    pub start_row: i32,
    pub combo: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSegment {
    pub start_row: i32,
    pub label: String,
}

macro_rules! impl_segment {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Segment for $ty {
                fn start_row(&self) -> i32 {
                    self.start_row
                }
            }
        )*
    };
}

impl_segment!(
    BpmSegment,
    StopSegment,
    WarpSegment,
    TimeSignatureSegment,
    TickcountSegment,
    ComboSegment,
    LabelSegment,
);

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_segment_beat() {
        let seg = BpmSegment {
            start_row: 96,
            bpm: 150.0,
        };
        assert_eq!(seg.beat(), 2.0);
    }

    #[test]
    fn test_required_kinds() {
        let required: Vec<SegmentKind> = SegmentKind::iter().filter(|k| k.is_required()).collect();
        assert_eq!(
            required,
            vec![
                SegmentKind::TimeSignature,
                SegmentKind::Tickcount,
                SegmentKind::Combo
            ]
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SegmentKind::Bpm.to_string(), "BPM");
        assert_eq!(SegmentKind::TimeSignature.to_string(), "TimeSignature");
        assert_eq!(SegmentKind::Delay.tag(), "DELAYS");
    }
}
