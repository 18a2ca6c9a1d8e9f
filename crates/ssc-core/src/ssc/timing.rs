//! Segment timeline encoder.
//!
//! Each kind becomes one tag whose entries are `beat=value[=value...]`. The
//! first entry follows the tag name, every entry ends its line, further
//! entries start with `,` and the closing `;` sits on its own line:
//!
//! ```text
//! #BPMS:0.000000=120.000000
//! ,64.000000=240.000000
//! ;
//! ```
//!
//! An empty collection yields `#TAG:;`.

use crate::config::format::LINE_ENDING;
use crate::error::{Error, Result};
use crate::ssc::sm_escape;
use crate::timing::{Segment, SegmentKind, TimingData};

/// Build a tag from already formatted entries.
pub(crate) fn entry_list_tag<I>(tag: &str, entries: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = format!("#{}:", tag);
    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&entry);
        out.push_str(LINE_ENDING);
    }
    out.push(';');
    out
}

fn beat_of<S: Segment>(segment: &S) -> String {
    format!("{:.6}", segment.beat())
}

pub fn encode_bpms(timing: &TimingData) -> String {
    entry_list_tag(
        SegmentKind::Bpm.tag(),
        timing
            .bpms
            .iter()
            .map(|s| format!("{}={:.6}", beat_of(s), s.bpm)),
    )
}

/// `STOPS` holds only the stop segments without the delay flag.
pub fn encode_stops(timing: &TimingData) -> String {
    entry_list_tag(
        SegmentKind::Stop.tag(),
        timing
            .stops_only()
            .map(|s| format!("{}={:.6}", beat_of(s), s.seconds)),
    )
}

/// `DELAYS` holds the delay-flagged stop segments.
pub fn encode_delays(timing: &TimingData) -> String {
    entry_list_tag(
        SegmentKind::Delay.tag(),
        timing
            .delays()
            .map(|s| format!("{}={:.6}", beat_of(s), s.seconds)),
    )
}

pub fn encode_warps(timing: &TimingData) -> String {
    entry_list_tag(
        SegmentKind::Warp.tag(),
        timing
            .warps
            .iter()
            .map(|s| format!("{}={:.6}", beat_of(s), s.end_beat)),
    )
}

pub fn encode_time_signatures(timing: &TimingData) -> Result<String> {
    require(!timing.time_signatures.is_empty(), SegmentKind::TimeSignature)?;
    Ok(entry_list_tag(
        SegmentKind::TimeSignature.tag(),
        timing
            .time_signatures
            .iter()
            .map(|s| format!("{}={}={}", beat_of(s), s.numerator, s.denominator)),
    ))
}

pub fn encode_tickcounts(timing: &TimingData) -> Result<String> {
    require(!timing.tickcounts.is_empty(), SegmentKind::Tickcount)?;
    Ok(entry_list_tag(
        SegmentKind::Tickcount.tag(),
        timing
            .tickcounts
            .iter()
            .map(|s| format!("{}={}", beat_of(s), s.ticks)),
    ))
}

pub fn encode_combos(timing: &TimingData) -> Result<String> {
    require(!timing.combos.is_empty(), SegmentKind::Combo)?;
    Ok(entry_list_tag(
        SegmentKind::Combo.tag(),
        timing
            .combos
            .iter()
            .map(|s| format!("{}={}", beat_of(s), s.combo)),
    ))
}

/// Label text as written: `,` and `=` separate entries and fields inside
/// the tag and can't be escaped there, so they become `_`.
pub fn label_text(label: &str) -> String {
    let label: String = label
        .chars()
        .map(|c| if matches!(c, ',' | '=') { '_' } else { c })
        .collect();
    sm_escape(&label)
}

pub fn encode_labels(timing: &TimingData) -> String {
    entry_list_tag(
        SegmentKind::Label.tag(),
        timing
            .labels
            .iter()
            .map(|s| format!("{}={}", beat_of(s), label_text(&s.label))),
    )
}

fn require(present: bool, kind: SegmentKind) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(Error::EmptySegments(kind))
    }
}

/// All timing tags in file order.
pub fn encode_timing(timing: &TimingData) -> Result<Vec<String>> {
    Ok(vec![
        encode_bpms(timing),
        encode_stops(timing),
        encode_delays(timing),
        encode_warps(timing),
        encode_time_signatures(timing)?,
        encode_tickcounts(timing)?,
        encode_combos(timing)?,
        encode_labels(timing),
    ])
}
