//! Background/foreground change encoder.

use crate::config::format::{LINE_ENDING, NUM_BACKGROUND_LAYERS};
use crate::song::{BackgroundChange, Song, normalize_color};
use crate::ssc::sm_escape;

/// Terminator appended to a non-empty layer 0 list. Tells the loader not to
/// append the song's own background at the end; the loader strips it.
pub const NO_SONG_BG_LINE: &str =
    "99999=-nosongbg-=1.000=0=0=0 // don't automatically add -songbackground-";

/// Encode one change as its 11-field `=`-separated record.
pub fn encode_background_change(bgc: &BackgroundChange) -> String {
    format!(
        "{:.3}={}={:.3}={}={}={}={}={}={}={}={}",
        bgc.start_beat,
        sm_escape(&bgc.file1),
        bgc.rate,
        u8::from(bgc.legacy_fade_last()),
        u8::from(bgc.legacy_rewind_movie()),
        u8::from(bgc.legacy_loop()),
        bgc.effect,
        bgc.file2,
        bgc.transition,
        sm_escape(&normalize_color(&bgc.color1)),
        sm_escape(&normalize_color(&bgc.color2)),
    )
}

fn change_list_tag(tag: &str, changes: &[BackgroundChange], terminate: bool) -> String {
    let mut out = format!("#{}:", tag);
    for bgc in changes {
        out.push_str(&encode_background_change(bgc));
        out.push(',');
        out.push_str(LINE_ENDING);
    }
    if terminate && !changes.is_empty() {
        out.push_str(NO_SONG_BG_LINE);
        out.push_str(LINE_ENDING);
    }
    out.push(';');
    out
}

/// Tag name for a background layer (`BGCHANGES`, `BGCHANGES2`, ...).
pub fn background_layer_tag(layer: usize) -> String {
    if layer == 0 {
        "BGCHANGES".to_string()
    } else {
        format!("BGCHANGES{}", layer + 1)
    }
}

/// `BGCHANGES` is always written; higher layers only when non-empty.
pub fn encode_background_layers(song: &Song) -> Vec<String> {
    (0..NUM_BACKGROUND_LAYERS)
        .filter_map(|layer| {
            let changes = song.background_changes(layer);
            if layer > 0 && changes.is_empty() {
                return None;
            }
            Some(change_list_tag(
                &background_layer_tag(layer),
                changes,
                layer == 0,
            ))
        })
        .collect()
}

/// `FGCHANGES`, or `None` when the song has no foreground changes.
pub fn encode_foreground_changes(song: &Song) -> Option<String> {
    if song.foreground_changes.is_empty() {
        None
    } else {
        Some(change_list_tag("FGCHANGES", &song.foreground_changes, false))
    }
}
