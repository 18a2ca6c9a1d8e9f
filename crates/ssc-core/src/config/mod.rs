//! Configuration and format constants.
//!
//! This module contains:
//! - `Config` - directories used when saving edit files (TOML)
//! - Format constants shared by the writer and the reader
//! - Profile layout constants

mod profile;

pub use profile::*;

/// SSC format constants.
pub mod format {
    /// Value written to the `#VERSION` tag.
    pub const STEPFILE_VERSION: f32 = 0.83;

    /// Subdivisions of a beat; a row is `beat * ROWS_PER_BEAT`.
    pub const ROWS_PER_BEAT: i32 = 48;

    /// Beat of the layer 0 terminator entry. Chosen to lie past any real
    /// chart; it carries no meaning beyond "strip on load".
    pub const NO_SONG_BG_BEAT: f64 = 99999.0;

    /// File name marker of the layer 0 terminator entry.
    pub const NO_SONG_BG_FILE: &str = "-nosongbg-";

    /// Number of background layers a song carries (layer 0 is the main one).
    pub const NUM_BACKGROUND_LAYERS: usize = 2;

    /// Line terminator used throughout SSC files.
    pub const LINE_ENDING: &str = "\r\n";
}

/// Profile directory layout.
pub mod profile_layout {
    /// Subdirectory of a profile holding edit files.
    pub const EDIT_STEPS_SUBDIR: &str = "Edits/";

    /// Extension of standalone edit files.
    pub const EDIT_FILE_EXTENSION: &str = ".edit";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_constants() {
        assert_eq!(format::ROWS_PER_BEAT, 48);
        assert_eq!(format::NUM_BACKGROUND_LAYERS, 2);
        assert_eq!(format!("{:.2}", format::STEPFILE_VERSION), "0.83");
    }

    #[test]
    fn test_edit_subdir_is_relative() {
        assert!(profile_layout::EDIT_STEPS_SUBDIR.ends_with('/'));
        assert!(!profile_layout::EDIT_STEPS_SUBDIR.starts_with('/'));
    }
}
