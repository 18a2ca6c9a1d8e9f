//! Tag reader for files produced by the writer.
//!
//! Splits `#NAME:param:param;` tags the way the game's MSD loader does and
//! decodes the song timing and background timelines. Building a full `Song`
//! from a file is left to the loader.

use crate::config::format::NO_SONG_BG_FILE;
use crate::error::{Error, Result};
use crate::song::{BackgroundChange, CROSS_FADE, STRETCH_NO_LOOP, STRETCH_REWIND};
use crate::timing::{
    BpmSegment, ComboSegment, LabelSegment, SegmentKind, StopSegment, TickcountSegment,
    TimeSignatureSegment, TimingData, WarpSegment, beat_to_row,
};

/// One `#NAME:...;` tag; `params[0]` is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsdTag {
    pub params: Vec<String>,
}

impl MsdTag {
    pub fn name(&self) -> &str {
        self.params.first().map(String::as_str).unwrap_or("")
    }

    /// First value parameter, or `""` for `#NAME;`.
    pub fn value(&self) -> &str {
        self.params.get(1).map(String::as_str).unwrap_or("")
    }

    /// All value parameters joined back with `:`.
    pub fn joined_value(&self) -> String {
        self.params.get(1..).unwrap_or(&[]).join(":")
    }
}

/// Split SSC/MSD text into tags.
///
/// Backslash escapes the next character, `//` starts a comment running to
/// the end of the line, and a `#` at the start of a line inside an
/// unterminated value starts a new tag.
pub fn parse_tags(text: &str) -> Vec<MsdTag> {
    let chars: Vec<char> = text.chars().collect();
    let mut tags = Vec::new();
    let mut current: Option<MsdTag> = None;
    let mut param = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        let Some(tag) = current.as_mut() else {
            if c == '#' {
                current = Some(MsdTag { params: Vec::new() });
                param.clear();
            }
            i += 1;
            continue;
        };

        match c {
            '\\' if i + 1 < chars.len() => {
                param.push(chars[i + 1]);
                i += 2;
                continue;
            }
            ':' => tag.params.push(std::mem::take(&mut param)),
            ';' => {
                tag.params.push(std::mem::take(&mut param));
                tags.extend(current.take());
            }
            '#' if at_line_start(&param) => {
                // Missing ';': close the running tag and start a new one.
                tag.params.push(trim_trailing_line(&param));
                tags.extend(current.take());
                current = Some(MsdTag { params: Vec::new() });
                param.clear();
            }
            _ => param.push(c),
        }
        i += 1;
    }

    if let Some(mut tag) = current {
        tag.params.push(param);
        tags.push(tag);
    }
    tags
}

fn at_line_start(param: &str) -> bool {
    param
        .trim_end_matches([' ', '\t'])
        .ends_with(['\n', '\r'])
}

fn trim_trailing_line(param: &str) -> String {
    param.trim_end().to_string()
}

/// First tag named `name` (case-insensitive).
pub fn find_tag<'a>(tags: &'a [MsdTag], name: &str) -> Option<&'a MsdTag> {
    tags.iter().find(|t| t.name().eq_ignore_ascii_case(name))
}

/// Split a value into its `,`-separated entries and their `=` fields.
/// Whitespace around entries and fields is dropped, empty entries skipped.
pub fn split_entries(value: &str) -> Vec<Vec<String>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.split('=').map(|f| f.trim().to_string()).collect())
        .collect()
}

fn parse_field<T: std::str::FromStr>(fields: &[String], idx: usize, kind: SegmentKind) -> Result<T> {
    let field = fields
        .get(idx)
        .ok_or_else(|| Error::Parse(format!("{} entry has too few fields", kind)))?;
    field
        .parse()
        .map_err(|_| Error::Parse(format!("invalid {} field {:?}", kind, field)))
}

fn parse_segments<T>(
    tags: &[MsdTag],
    kind: SegmentKind,
    mut build: impl FnMut(i32, &[String]) -> Result<T>,
) -> Result<Vec<T>> {
    let Some(tag) = find_tag(tags, kind.tag()) else {
        return Ok(Vec::new());
    };
    split_entries(&tag.joined_value())
        .iter()
        .map(|fields| {
            let beat: f64 = parse_field(fields, 0, kind)?;
            build(beat_to_row(beat), fields)
        })
        .collect()
}

/// Decode the song-level timing tags (the first occurrence of each).
pub fn read_timing(tags: &[MsdTag]) -> Result<TimingData> {
    let mut timing = TimingData {
        beat0_offset_seconds: match find_tag(tags, "OFFSET") {
            Some(tag) => tag
                .value()
                .trim()
                .parse()
                .map_err(|_| Error::Parse(format!("invalid OFFSET {:?}", tag.value())))?,
            None => 0.0,
        },
        ..Default::default()
    };

    timing.bpms = parse_segments(tags, SegmentKind::Bpm, |start_row, f| {
        Ok(BpmSegment {
            start_row,
            bpm: parse_field(f, 1, SegmentKind::Bpm)?,
        })
    })?;

    let stops = parse_segments(tags, SegmentKind::Stop, |start_row, f| {
        Ok(StopSegment {
            start_row,
            seconds: parse_field(f, 1, SegmentKind::Stop)?,
            delay: false,
        })
    })?;
    let delays = parse_segments(tags, SegmentKind::Delay, |start_row, f| {
        Ok(StopSegment {
            start_row,
            seconds: parse_field(f, 1, SegmentKind::Delay)?,
            delay: true,
        })
    })?;
    timing.stops = stops.into_iter().chain(delays).collect();
    timing.stops.sort_by_key(|s| s.start_row);

    timing.warps = parse_segments(tags, SegmentKind::Warp, |start_row, f| {
        Ok(WarpSegment {
            start_row,
            end_beat: parse_field(f, 1, SegmentKind::Warp)?,
        })
    })?;
    timing.time_signatures = parse_segments(tags, SegmentKind::TimeSignature, |start_row, f| {
        Ok(TimeSignatureSegment {
            start_row,
            numerator: parse_field(f, 1, SegmentKind::TimeSignature)?,
            denominator: parse_field(f, 2, SegmentKind::TimeSignature)?,
        })
    })?;
    timing.tickcounts = parse_segments(tags, SegmentKind::Tickcount, |start_row, f| {
        Ok(TickcountSegment {
            start_row,
            ticks: parse_field(f, 1, SegmentKind::Tickcount)?,
        })
    })?;
    timing.combos = parse_segments(tags, SegmentKind::Combo, |start_row, f| {
        Ok(ComboSegment {
            start_row,
            combo: parse_field(f, 1, SegmentKind::Combo)?,
        })
    })?;
    timing.labels = parse_segments(tags, SegmentKind::Label, |start_row, f| {
        Ok(LabelSegment {
            start_row,
            label: f.get(1).cloned().unwrap_or_default(),
        })
    })?;

    Ok(timing)
}

fn flag(fields: &[String], idx: usize) -> bool {
    fields.get(idx).is_some_and(|f| f == "1")
}

fn field(fields: &[String], idx: usize) -> String {
    fields.get(idx).cloned().unwrap_or_default()
}

/// Decode one background change record.
///
/// Records with fewer than 7 fields predate effect names; their effect and
/// transition are rebuilt from the legacy flags.
pub fn parse_background_change(fields: &[String]) -> Result<BackgroundChange> {
    let start_beat = fields
        .first()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| Error::Parse(format!("invalid background change {:?}", fields)))?;
    let rate = fields
        .get(2)
        .and_then(|f| f.parse().ok())
        .unwrap_or(1.0);

    let mut bgc = BackgroundChange {
        start_beat,
        rate,
        file1: field(fields, 1),
        ..Default::default()
    };

    if fields.len() >= 7 {
        bgc.effect = field(fields, 6);
        bgc.file2 = field(fields, 7);
        bgc.transition = field(fields, 8);
        bgc.color1 = field(fields, 9);
        bgc.color2 = field(fields, 10);
    } else {
        if flag(fields, 3) {
            bgc.transition = CROSS_FADE.to_string();
        }
        if flag(fields, 4) {
            bgc.effect = STRETCH_REWIND.to_string();
        }
        if fields.len() > 5 && !flag(fields, 5) {
            bgc.effect = STRETCH_NO_LOOP.to_string();
        }
    }
    Ok(bgc)
}

/// Decode a `BGCHANGES`/`FGCHANGES` value, dropping the `-nosongbg-`
/// terminator. The flag tells whether the terminator was present.
pub fn read_background_changes(value: &str) -> Result<(Vec<BackgroundChange>, bool)> {
    let mut saw_terminator = false;
    let mut changes = Vec::new();
    for fields in split_entries(value) {
        if fields.get(1).is_some_and(|f| f == NO_SONG_BG_FILE) {
            saw_terminator = true;
            continue;
        }
        changes.push(parse_background_change(&fields)?);
    }
    Ok((changes, saw_terminator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tags() {
        let tags = parse_tags("#TITLE:Song;\r\n#ARTIST:Someone;\r\n");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name(), "TITLE");
        assert_eq!(tags[0].value(), "Song");
        assert_eq!(tags[1].value(), "Someone");
    }

    #[test]
    fn test_parse_escapes_and_params() {
        let tags = parse_tags("#TITLE:a\\;b\\:c;#DISPLAYBPM:100.000000:200.000000;");
        assert_eq!(tags[0].value(), "a;b:c");
        assert_eq!(tags[1].params, vec!["DISPLAYBPM", "100.000000", "200.000000"]);
        assert_eq!(tags[1].joined_value(), "100.000000:200.000000");
    }

    #[test]
    fn test_parse_skips_comments() {
        let tags = parse_tags("// header\r\n#NOTEDATA:;\r\n//---x - y----\r\n#METER:5;");
        let names: Vec<&str> = tags.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["NOTEDATA", "METER"]);
        assert_eq!(tags[0].value(), "");
    }

    #[test]
    fn test_parse_recovers_missing_semicolon() {
        let tags = parse_tags("#TITLE:Broken\r\n#ARTIST:Fine;");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].value(), "Broken");
        assert_eq!(tags[1].name(), "ARTIST");
    }

    #[test]
    fn test_split_entries() {
        let entries = split_entries("0.000000=120.000000\r\n,4.000000=140.000000\r\n");
        assert_eq!(
            entries,
            vec![
                vec!["0.000000".to_string(), "120.000000".to_string()],
                vec!["4.000000".to_string(), "140.000000".to_string()],
            ]
        );
        assert!(split_entries("").is_empty());
    }

    #[test]
    fn test_read_timing_merges_stops_and_delays() {
        let tags = parse_tags(
            "#OFFSET:-0.025000;\r\n#STOPS:2.000000=0.500000\r\n;\r\n#DELAYS:1.000000=0.250000\r\n;\r\n",
        );
        let timing = read_timing(&tags).unwrap();
        assert_eq!(timing.beat0_offset_seconds, -0.025);
        assert_eq!(timing.stops.len(), 2);
        assert_eq!(timing.stops[0].start_row, 48);
        assert!(timing.stops[0].delay);
        assert_eq!(timing.stops[1].start_row, 96);
        assert!(!timing.stops[1].delay);
    }

    #[test]
    fn test_read_timing_rejects_garbage() {
        let tags = parse_tags("#BPMS:zero=120;");
        assert!(matches!(read_timing(&tags), Err(Error::Parse(_))));
    }

    #[test]
    fn test_read_background_changes_strips_terminator() {
        let value = "0.000=bg.png=1.000=0=0=1=====,\r\n99999=-nosongbg-=1.000=0=0=0 \r\n";
        let (changes, terminated) = read_background_changes(value).unwrap();
        assert!(terminated);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].file1, "bg.png");
    }

    #[test]
    fn test_legacy_background_record() {
        let fields: Vec<String> = "4.000=old.avi=1.000=1=0=0"
            .split('=')
            .map(String::from)
            .collect();
        let bgc = parse_background_change(&fields).unwrap();
        assert_eq!(bgc.transition, CROSS_FADE);
        assert_eq!(bgc.effect, STRETCH_NO_LOOP);
        assert_eq!(bgc.start_beat, 4.0);
    }
}
