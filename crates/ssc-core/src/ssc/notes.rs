//! Per-chart note block encoder.

use strum::IntoEnumIterator;

use crate::config::format::LINE_ENDING;
use crate::error::Result;
use crate::song::{PlayerNumber, RadarCategory, Song, Steps};
use crate::ssc::{StepsTypeCatalog, sm_escape};

/// Chart-scope timing tags. Timing lives at song scope, so these are always
/// written empty.
const EMPTY_CHART_TIMING_TAGS: [&str; 9] = [
    "#BPMS:;",
    "#STOPS:;",
    "#DELAYS:;",
    "#WARPS:;",
    "#LABELS:;",
    "#TIMESIGNATURES:;",
    "#TICKCOUNTS:;",
    "#ATTACKS:;",
    "#COMBOS:;",
];

/// Flat radar list: players outer, categories inner, 3 decimals.
pub fn format_radar_values(steps: &Steps) -> String {
    PlayerNumber::iter()
        .flat_map(|pn| {
            let rv = steps.radar_values(pn);
            RadarCategory::iter().map(move |rc| format!("{:.3}", rv.get(rc)))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode one chart as its `#NOTEDATA` block.
///
/// The block starts with an empty line and has no trailing line ending;
/// lines are joined with CRLF.
pub fn encode_note_block<C>(song: &Song, steps: &Steps, catalog: &C) -> Result<String>
where
    C: StepsTypeCatalog + ?Sized,
{
    let notes = steps.sm_note_data()?;
    let steps_type = catalog.name(steps.steps_type);
    let description = sm_escape(&steps.description);

    let mut lines = vec![
        String::new(),
        // Escaped so a description can't smuggle in "\r\n;".
        format!(
            "//---------------{} - {}----------------",
            steps_type, description
        ),
        "#NOTEDATA:;".to_string(),
        format!("#STEPSTYPE:{};", steps_type),
        format!("#DESCRIPTION:{};", description),
        format!("#CHARTSTYLE:{};", sm_escape(&steps.chart_style)),
        format!("#DIFFICULTY:{};", steps.difficulty),
        format!("#METER:{};", steps.meter),
        format!("#RADARVALUES:{};", format_radar_values(steps)),
        format!("#CREDIT:{};", sm_escape(&steps.credit)),
    ];
    lines.extend(EMPTY_CHART_TIMING_TAGS.iter().map(|t| t.to_string()));

    lines.push(if song.uses_keysounds() {
        "#NOTES2:".to_string()
    } else {
        "#NOTES:".to_string()
    });
    lines.extend(
        notes
            .trim_start()
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string),
    );
    lines.push(";".to_string());

    Ok(join_lines(lines))
}

/// Right-trim every line and join with CRLF.
fn join_lines(lines: Vec<String>) -> String {
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}
