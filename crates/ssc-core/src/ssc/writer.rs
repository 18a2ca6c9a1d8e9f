//! SSC file writer.

use std::path::Path;

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::config::format::{LINE_ENDING, STEPFILE_VERSION};
use crate::error::{Error, Result};
use crate::song::{DisplayBpm, InstrumentTrack, Song, Steps};
use crate::ssc::background::{encode_background_layers, encode_foreground_changes};
use crate::ssc::notes::encode_note_block;
use crate::ssc::timing::encode_timing;
use crate::ssc::{BuiltinStepsTypes, StepsTypeCatalog, sm_escape};
use crate::storage::{DiskStore, FileStore, OpenMode, StoreFile};

/// Song-level tags, one entry per tag. Multi-line tags carry their inner
/// line endings; the caller terminates each entry.
pub fn global_tags(song: &Song) -> Result<Vec<String>> {
    let escaped = [
        ("TITLE", &song.main_title),
        ("SUBTITLE", &song.sub_title),
        ("ARTIST", &song.artist),
        ("TITLETRANSLIT", &song.main_title_translit),
        ("SUBTITLETRANSLIT", &song.sub_title_translit),
        ("ARTISTTRANSLIT", &song.artist_translit),
        ("GENRE", &song.genre),
        ("ORIGIN", &song.origin),
        ("CREDIT", &song.credit),
        ("BANNER", &song.banner_file),
        ("BACKGROUND", &song.background_file),
        ("LYRICSPATH", &song.lyrics_file),
        ("CDTITLE", &song.cd_title_file),
        ("MUSIC", &song.music_file),
    ];

    let mut tags = vec![format!("#VERSION:{:.2};", STEPFILE_VERSION)];
    tags.extend(
        escaped
            .iter()
            .map(|(tag, value)| format!("#{}:{};", tag, sm_escape(value))),
    );

    let tracks: Vec<String> = InstrumentTrack::iter()
        .filter(|it| song.has_instrument_track(*it))
        .map(|it| format!("{}={}", it, song.instrument_tracks[&it]))
        .collect();
    if !tracks.is_empty() {
        tags.push(format!("#INSTRUMENTTRACK:{};", tracks.join(",")));
    }

    tags.push(format!("#OFFSET:{:.6};", song.timing.beat0_offset_seconds));
    tags.push(format!("#SAMPLESTART:{:.6};", song.music_sample_start_seconds));
    tags.push(format!("#SAMPLELENGTH:{:.6};", song.music_sample_length_seconds));
    if song.specified_last_beat > 0.0 {
        tags.push(format!("#LASTBEATHINT:{:.6};", song.specified_last_beat));
    }
    tags.push(format!("#SELECTABLE:{};", song.selectable.as_str()));

    match song.display_bpm {
        DisplayBpm::Actual => {}
        DisplayBpm::Specified { min, max } if min == max => {
            tags.push(format!("#DISPLAYBPM:{:.6};", min));
        }
        DisplayBpm::Specified { min, max } => {
            tags.push(format!("#DISPLAYBPM:{:.6}:{:.6};", min, max));
        }
        DisplayBpm::Random => tags.push("#DISPLAYBPM:*;".to_string()),
    }

    tags.extend(encode_timing(&song.timing)?);
    tags.extend(encode_background_layers(song));
    tags.extend(encode_foreground_changes(song));

    tags.push(format!("#KEYSOUNDS:{};", song.keysound_files.join(",")));
    tags.push(format!("#ATTACKS:{};", song.attacks.join(":")));

    Ok(tags)
}

/// Derived values that let a cache reload skip rescanning the song.
pub fn cache_tags(song: &Song) -> Vec<String> {
    vec![
        "// cache tags:".to_string(),
        format!("#FIRSTBEAT:{:.3};", song.first_beat),
        format!("#LASTBEAT:{:.3};", song.last_beat),
        format!("#SONGFILENAME:{};", song.song_file_name),
        format!("#HASMUSIC:{};", u8::from(song.has_music)),
        format!("#HASBANNER:{};", u8::from(song.has_banner)),
        format!("#MUSICLENGTH:{:.3};", song.music_length_seconds),
        "// end cache tags".to_string(),
    ]
}

/// Writes songs in the SSC format through a `FileStore`.
pub struct SscWriter<S = DiskStore, C = BuiltinStepsTypes> {
    store: S,
    catalog: C,
}

impl SscWriter {
    /// Writer using the local filesystem and the built-in step-style names.
    pub fn new() -> Self {
        Self::with_store(DiskStore::new())
    }
}

impl Default for SscWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FileStore> SscWriter<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            catalog: BuiltinStepsTypes,
        }
    }
}

impl<S: FileStore, C: StepsTypeCatalog> SscWriter<S, C> {
    pub fn with_parts(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Render the complete file in memory.
    pub fn render(&self, song: &Song, steps: &[&Steps], cache: bool) -> Result<String> {
        let mut out = String::new();
        for line in self.lines(song, steps, cache)? {
            out.push_str(&line);
            out.push_str(LINE_ENDING);
        }
        Ok(out)
    }

    fn lines(&self, song: &Song, steps: &[&Steps], cache: bool) -> Result<Vec<String>> {
        let mut lines = global_tags(song)?;
        if cache {
            lines.extend(cache_tags(song));
        }
        for s in steps {
            lines.push(encode_note_block(song, s, &self.catalog)?);
        }
        Ok(lines)
    }

    /// Write `song` and the given charts to `path`.
    ///
    /// Regular saves are opened durable; cache writes skip that for speed.
    /// Everything is encoded before the file is opened, so invariant
    /// violations and note-data errors never leave a truncated file.
    pub fn write(&self, path: &Path, song: &Song, steps: &[&Steps], cache: bool) -> Result<()> {
        song.timing.validate()?;
        let lines = self.lines(song, steps, cache)?;

        let mode = if cache {
            OpenMode::Fast
        } else {
            OpenMode::Durable
        };
        let mut file = match self.store.open(path, mode) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Song file {:?} couldn't be opened for writing: {}",
                    path, e
                );
                return Err(Error::OpenFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        for line in &lines {
            file.put_line(line).map_err(|e| write_failed(path, e))?;
        }
        file.flush().map_err(|e| write_failed(path, e))?;

        debug!(
            "Wrote {:?} ({} charts{})",
            path,
            steps.len(),
            if cache { ", cache" } else { "" }
        );
        Ok(())
    }
}

pub(crate) fn write_failed(path: &Path, e: Error) -> Error {
    Error::WriteFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
