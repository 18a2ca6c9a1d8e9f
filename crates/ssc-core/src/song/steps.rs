use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

use crate::error::{Error, Result};

/// Game mode / pad layout of a chart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum StepsType {
    #[strum(serialize = "dance-single")]
    #[serde(rename = "dance-single")]
    DanceSingle,
    #[strum(serialize = "dance-double")]
    #[serde(rename = "dance-double")]
    DanceDouble,
    #[strum(serialize = "dance-couple")]
    #[serde(rename = "dance-couple")]
    DanceCouple,
    #[strum(serialize = "dance-solo")]
    #[serde(rename = "dance-solo")]
    DanceSolo,
    #[strum(serialize = "dance-threepanel")]
    #[serde(rename = "dance-threepanel")]
    DanceThreepanel,
    #[strum(serialize = "dance-routine")]
    #[serde(rename = "dance-routine")]
    DanceRoutine,
    #[strum(serialize = "pump-single")]
    #[serde(rename = "pump-single")]
    PumpSingle,
    #[strum(serialize = "pump-halfdouble")]
    #[serde(rename = "pump-halfdouble")]
    PumpHalfdouble,
    #[strum(serialize = "pump-double")]
    #[serde(rename = "pump-double")]
    PumpDouble,
    #[strum(serialize = "pump-couple")]
    #[serde(rename = "pump-couple")]
    PumpCouple,
    #[strum(serialize = "pump-routine")]
    #[serde(rename = "pump-routine")]
    PumpRoutine,
    #[strum(serialize = "kb7-single")]
    #[serde(rename = "kb7-single")]
    Kb7Single,
    #[strum(serialize = "techno-single4")]
    #[serde(rename = "techno-single4")]
    TechnoSingle4,
    #[strum(serialize = "techno-double4")]
    #[serde(rename = "techno-double4")]
    TechnoDouble4,
    #[strum(serialize = "beat-single5")]
    #[serde(rename = "beat-single5")]
    BeatSingle5,
    #[strum(serialize = "beat-single7")]
    #[serde(rename = "beat-single7")]
    BeatSingle7,
    #[strum(serialize = "lights-cabinet")]
    #[serde(rename = "lights-cabinet")]
    LightsCabinet,
}

impl StepsType {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

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
    Default,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
    FromRepr,
)]
#[repr(u8)]
pub enum Difficulty {
    Beginner = 0,
    Easy = 1,
    #[default]
    Medium = 2,
    Hard = 3,
    Challenge = 4,
    Edit = 5,
}

impl Difficulty {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount)]
#[repr(u8)]
pub enum PlayerNumber {
    P1 = 0,
    P2 = 1,
}

/// Radar categories in the fixed order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount)]
#[repr(u8)]
pub enum RadarCategory {
    Stream = 0,
    Voltage,
    Air,
    Freeze,
    Chaos,
    TapsAndHolds,
    Jumps,
    Holds,
    Mines,
    Hands,
    Rolls,
    Lifts,
    Fakes,
}

/// One player's radar values, indexed by `RadarCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadarValues(pub [f32; RadarCategory::COUNT]);

impl RadarValues {
    pub fn get(&self, category: RadarCategory) -> f32 {
        self.0[category as usize]
    }

    pub fn set(&mut self, category: RadarCategory, value: f32) {
        self.0[category as usize] = value;
    }
}

/// One playable chart of a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Steps {
    pub steps_type: StepsType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_meter")]
    pub meter: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chart_style: String,
    #[serde(default)]
    pub credit: String,
    #[serde(default)]
    pub radar_values: [RadarValues; PlayerNumber::COUNT],
    /// Row-encoded note text (measures separated by `,`). `None` when the
    /// stream was never loaded.
    #[serde(default)]
    pub note_data: Option<String>,
    #[serde(default)]
    pub saved_to_disk: bool,
    #[serde(default)]
    pub filename: Option<PathBuf>,
}

fn default_meter() -> i32 {
    1
}

impl Steps {
    pub fn new(steps_type: StepsType, difficulty: Difficulty) -> Self {
        Self {
            steps_type,
            difficulty,
            meter: default_meter(),
            description: String::new(),
            chart_style: String::new(),
            credit: String::new(),
            radar_values: Default::default(),
            note_data: None,
            saved_to_disk: false,
            filename: None,
        }
    }

    pub fn radar_values(&self, player: PlayerNumber) -> &RadarValues {
        &self.radar_values[player as usize]
    }

    /// The note stream in its row-encoded text form.
    ///
    /// Fails when the stream was never loaded or contains `;`, which would
    /// end the `#NOTES` tag early.
    pub fn sm_note_data(&self) -> Result<&str> {
        let notes = self
            .note_data
            .as_deref()
            .ok_or_else(|| Error::NoteData("note data is not loaded".to_string()))?;
        if let Some(pos) = notes.find(';') {
            return Err(Error::NoteData(format!(
                "unexpected ';' at byte {} of note data",
                pos
            )));
        }
        Ok(notes)
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Record the file this chart was last saved to.
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_steps_type_names() {
        assert_eq!(StepsType::DanceSingle.name(), "dance-single");
        assert_eq!(StepsType::PumpHalfdouble.name(), "pump-halfdouble");
        assert_eq!(
            StepsType::from_str("dance-double").unwrap(),
            StepsType::DanceDouble
        );
    }

    #[test]
    fn test_difficulty_strings() {
        assert_eq!(Difficulty::Challenge.to_string(), "Challenge");
        assert_eq!(Difficulty::from_str("Edit").unwrap(), Difficulty::Edit);
        assert_eq!(Difficulty::from_u8(0), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::from_u8(6), None);
    }

    #[test]
    fn test_radar_values_indexing() {
        let mut rv = RadarValues::default();
        rv.set(RadarCategory::Mines, 12.0);
        assert_eq!(rv.get(RadarCategory::Mines), 12.0);
        assert_eq!(rv.0[8], 12.0);
        assert_eq!(RadarCategory::COUNT, 13);
    }

    #[test]
    fn test_sm_note_data_missing() {
        let steps = Steps::new(StepsType::DanceSingle, Difficulty::Easy);
        assert!(matches!(steps.sm_note_data(), Err(Error::NoteData(_))));
    }

    #[test]
    fn test_sm_note_data_rejects_terminator() {
        let mut steps = Steps::new(StepsType::DanceSingle, Difficulty::Easy);
        steps.note_data = Some("0000\n;1000\n".to_string());
        assert!(matches!(steps.sm_note_data(), Err(Error::NoteData(_))));

        steps.note_data = Some("0000\n1000\n".to_string());
        assert_eq!(steps.sm_note_data().unwrap(), "0000\n1000\n");
    }

    #[test]
    fn test_steps_from_json_defaults() {
        let steps: Steps = serde_json::from_str(r#"{"steps_type":"dance-single"}"#).unwrap();
        assert_eq!(steps.difficulty, Difficulty::Medium);
        assert_eq!(steps.meter, 1);
        assert!(!steps.saved_to_disk);
    }
}
