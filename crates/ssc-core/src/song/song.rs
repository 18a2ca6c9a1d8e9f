use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::format::NUM_BACKGROUND_LAYERS;
use crate::song::{BackgroundChange, Steps};
use crate::timing::TimingData;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum InstrumentTrack {
    Guitar,
    Rhythm,
    Bass,
}

/// Whether the song shows up on the music wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selectable {
    #[default]
    Always,
    Never,
}

impl Selectable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "YES",
            Self::Never => "NO",
        }
    }
}

/// How the BPM is presented on the music wheel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBpm {
    /// Show the real BPM range computed from the timing data.
    #[default]
    Actual,
    Specified { min: f64, max: f64 },
    /// Flicker through random values.
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub main_title: String,
    pub sub_title: String,
    pub artist: String,
    pub main_title_translit: String,
    pub sub_title_translit: String,
    pub artist_translit: String,
    pub genre: String,
    pub origin: String,
    pub credit: String,
    pub banner_file: String,
    pub background_file: String,
    pub lyrics_file: String,
    pub cd_title_file: String,
    pub music_file: String,
    pub instrument_tracks: BTreeMap<InstrumentTrack, String>,

    pub music_sample_start_seconds: f64,
    pub music_sample_length_seconds: f64,
    /// Last beat given by the author; ignored when not positive.
    pub specified_last_beat: f64,
    pub selectable: Selectable,
    pub display_bpm: DisplayBpm,

    pub timing: TimingData,

    /// Background timelines; index 0 is the main layer.
    pub background_changes: [Vec<BackgroundChange>; NUM_BACKGROUND_LAYERS],
    pub foreground_changes: Vec<BackgroundChange>,
    pub keysound_files: Vec<String>,
    pub attacks: Vec<String>,

    /// Directory of the song package, e.g. `Songs/Group/Title/`.
    pub song_dir: String,

    // Derived values written to cache files only.
    pub first_beat: f64,
    pub last_beat: f64,
    pub song_file_name: String,
    pub has_music: bool,
    pub has_banner: bool,
    pub music_length_seconds: f64,

    pub steps: Vec<Steps>,
}

impl Default for Song {
    fn default() -> Self {
        Self {
            main_title: String::new(),
            sub_title: String::new(),
            artist: String::new(),
            main_title_translit: String::new(),
            sub_title_translit: String::new(),
            artist_translit: String::new(),
            genre: String::new(),
            origin: String::new(),
            credit: String::new(),
            banner_file: String::new(),
            background_file: String::new(),
            lyrics_file: String::new(),
            cd_title_file: String::new(),
            music_file: String::new(),
            instrument_tracks: BTreeMap::new(),
            music_sample_start_seconds: 0.0,
            music_sample_length_seconds: 12.0,
            specified_last_beat: 0.0,
            selectable: Selectable::Always,
            display_bpm: DisplayBpm::Actual,
            timing: TimingData::with_bpm(120.0),
            background_changes: Default::default(),
            foreground_changes: Vec::new(),
            keysound_files: Vec::new(),
            attacks: Vec::new(),
            song_dir: String::new(),
            first_beat: 0.0,
            last_beat: 0.0,
            song_file_name: String::new(),
            has_music: false,
            has_banner: false,
            music_length_seconds: 0.0,
            steps: Vec::new(),
        }
    }
}

impl Song {
    pub fn background_changes(&self, layer: usize) -> &[BackgroundChange] {
        self.background_changes
            .get(layer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_instrument_track(&self, track: InstrumentTrack) -> bool {
        self.instrument_tracks
            .get(&track)
            .is_some_and(|file| !file.is_empty())
    }

    pub fn translit_main_title(&self) -> &str {
        if self.main_title_translit.is_empty() {
            &self.main_title
        } else {
            &self.main_title_translit
        }
    }

    pub fn translit_sub_title(&self) -> &str {
        if self.sub_title_translit.is_empty() {
            &self.sub_title
        } else {
            &self.sub_title_translit
        }
    }

    /// Transliterated title with the subtitle appended when present.
    pub fn translit_full_title(&self) -> String {
        if self.sub_title.is_empty() {
            self.translit_main_title().to_string()
        } else {
            format!("{} {}", self.translit_main_title(), self.translit_sub_title())
        }
    }

    /// Whether charts of this song reference keysounds.
    pub fn uses_keysounds(&self) -> bool {
        !self.keysound_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translit_full_title() {
        let mut song = Song {
            main_title: "夜桜".to_string(),
            main_title_translit: "Yozakura".to_string(),
            ..Default::default()
        };
        assert_eq!(song.translit_full_title(), "Yozakura");

        song.sub_title = "(Long ver.)".to_string();
        assert_eq!(song.translit_full_title(), "Yozakura (Long ver.)");
    }

    #[test]
    fn test_translit_falls_back_to_main_title() {
        let song = Song {
            main_title: "Plain".to_string(),
            sub_title: "Sub".to_string(),
            ..Default::default()
        };
        assert_eq!(song.translit_full_title(), "Plain Sub");
    }

    #[test]
    fn test_background_layers() {
        let mut song = Song::default();
        song.background_changes[1].push(BackgroundChange::new(4.0, "layer2.png"));
        assert!(song.background_changes(0).is_empty());
        assert_eq!(song.background_changes(1).len(), 1);
        assert!(song.background_changes(7).is_empty());
    }

    #[test]
    fn test_instrument_tracks() {
        let mut song = Song::default();
        song.instrument_tracks
            .insert(InstrumentTrack::Bass, "bass.ogg".to_string());
        song.instrument_tracks
            .insert(InstrumentTrack::Guitar, String::new());
        assert!(song.has_instrument_track(InstrumentTrack::Bass));
        assert!(!song.has_instrument_track(InstrumentTrack::Guitar));
        assert!(!song.has_instrument_track(InstrumentTrack::Rhythm));
    }

    #[test]
    fn test_song_from_json() {
        let song: Song = serde_json::from_str(
            r#"{
                "main_title": "Test",
                "display_bpm": {"type": "specified", "min": 100.0, "max": 200.0},
                "instrument_tracks": {"Guitar": "guitar.ogg"}
            }"#,
        )
        .unwrap();
        assert_eq!(song.main_title, "Test");
        assert_eq!(
            song.display_bpm,
            DisplayBpm::Specified {
                min: 100.0,
                max: 200.0
            }
        );
        assert!(song.has_instrument_track(InstrumentTrack::Guitar));
        assert!(song.timing.validate().is_ok());
    }
}
