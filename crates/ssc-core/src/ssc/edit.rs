//! Standalone edit files: one chart plus a `#SONG` reference.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ProfileDirs;
use crate::config::format::LINE_ENDING;
use crate::config::profile_layout::{EDIT_FILE_EXTENSION, EDIT_STEPS_SUBDIR};
use crate::error::{Error, Result};
use crate::song::{Song, Steps, StepsType};
use crate::ssc::notes::encode_note_block;
use crate::ssc::writer::write_failed;
use crate::ssc::{SscWriter, StepsTypeCatalog};
use crate::storage::{FileStore, OpenMode, StoreFile};

/// Characters that are never allowed in generated file names.
const INVALID_FILENAME_CHARS: &str = "/\\:*?\"<>|";

/// Song directory relative to its container, e.g. `Songs/Group/Title/`
/// becomes `Group/Title`.
pub fn song_dir_without_container(song_dir: &str) -> String {
    let parts: Vec<&str> = song_dir.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        song_dir.to_string()
    } else {
        parts[1..].join("/")
    }
}

/// Replace characters that are unsafe in file names on common filesystems.
///
/// Printable ASCII is kept except `/\:*?"<>|`; `"` becomes `'` and
/// everything else (control characters, `~`, non-ASCII) becomes `_`.
pub fn make_valid_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' => '\'',
            ' '..='}' if !INVALID_FILENAME_CHARS.contains(c) => c,
            _ => '_',
        })
        .collect()
}

/// Full contents of an edit file for `steps`.
pub fn edit_file_contents<C>(song: &Song, steps: &Steps, catalog: &C) -> Result<String>
where
    C: StepsTypeCatalog + ?Sized,
{
    let mut out = format!(
        "#SONG:{};{}",
        song_dir_without_container(&song.song_dir),
        LINE_ENDING
    );
    out.push_str(&encode_note_block(song, steps, catalog)?);
    Ok(out)
}

/// File name for an edit of `steps`.
///
/// Not guaranteed unique: descriptions are case-sensitive while most
/// filesystems are not, and sanitizing folds distinct characters together.
pub fn edit_file_name(song: &Song, steps: &Steps) -> String {
    let mut name = format!("{} - {}", song.translit_full_title(), steps.description);
    if steps.steps_type == StepsType::DanceDouble {
        name.push_str(" (doubles)");
    }
    name.push_str(EDIT_FILE_EXTENSION);
    make_valid_filename(&name)
}

impl<S: FileStore, C: StepsTypeCatalog> SscWriter<S, C> {
    /// Export `steps` as a standalone edit file at `path`.
    pub fn write_edit_file(&self, path: &Path, song: &Song, steps: &Steps) -> Result<()> {
        let contents = edit_file_contents(song, steps, self.catalog())?;

        let mut file = self
            .store()
            .open(path, OpenMode::Durable)
            .map_err(|e| write_failed(path, e))?;
        file.put_line(&contents)
            .and_then(|_| file.flush())
            .map_err(|e| write_failed(path, e))
    }

    /// Save `steps` into the machine profile's edit directory.
    ///
    /// Refuses to overwrite a different existing file when the edit's name
    /// changed since its last save. The previous file is removed only after
    /// the new one was written and flushed. Returns the new path.
    pub fn write_edit_file_to_machine<P>(
        &self,
        profile: &P,
        song: &Song,
        steps: &mut Steps,
    ) -> Result<PathBuf>
    where
        P: ProfileDirs + ?Sized,
    {
        let dir = profile.machine_profile_dir().join(EDIT_STEPS_SUBDIR);
        let path = dir.join(edit_file_name(song, steps));

        let file_name_changing =
            steps.saved_to_disk && steps.filename() != Some(path.as_path());
        if file_name_changing && self.store().exists(&path) {
            return Err(Error::DestinationExists(path));
        }

        self.write_edit_file(&path, song, steps)?;

        if file_name_changing {
            if let Some(old) = steps.filename().map(Path::to_path_buf) {
                match self.store().remove(&old) {
                    Ok(()) => info!("Renamed edit {:?} -> {:?}", old, path),
                    Err(e) => warn!("Couldn't remove previous edit {:?}: {}", old, e),
                }
            }
        }
        steps.set_filename(&path);
        steps.saved_to_disk = true;

        info!("Saved edit {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssc::BuiltinStepsTypes;
    use crate::song::Difficulty;

    #[test]
    fn test_song_dir_without_container() {
        assert_eq!(song_dir_without_container("Songs/Group/Title/"), "Group/Title");
        assert_eq!(song_dir_without_container("Songs/Group/Title"), "Group/Title");
        assert_eq!(
            song_dir_without_container("/AdditionalSongs/Pack/Song/"),
            "Pack/Song"
        );
        assert_eq!(song_dir_without_container("Songs"), "");
        assert_eq!(song_dir_without_container(""), "");
    }

    #[test]
    fn test_make_valid_filename() {
        assert_eq!(make_valid_filename("Plain Name.edit"), "Plain Name.edit");
        assert_eq!(make_valid_filename("a/b\\c:d*e?f<g>h|i"), "a_b_c_d_e_f_g_h_i");
        assert_eq!(make_valid_filename("say \"hi\""), "say 'hi'");
        assert_eq!(make_valid_filename("tilde~tab\t"), "tilde_tab_");
        assert_eq!(make_valid_filename("夜桜"), "__");
    }

    #[test]
    fn test_edit_file_name() {
        let song = Song {
            main_title: "Title".to_string(),
            sub_title: "Sub".to_string(),
            ..Default::default()
        };
        let mut steps = Steps::new(StepsType::DanceSingle, Difficulty::Edit);
        steps.description = "My: Edit?".to_string();
        assert_eq!(edit_file_name(&song, &steps), "Title Sub - My_ Edit_.edit");

        steps.steps_type = StepsType::DanceDouble;
        assert_eq!(
            edit_file_name(&song, &steps),
            "Title Sub - My_ Edit_ (doubles).edit"
        );
    }

    #[test]
    fn test_edit_file_contents() {
        let song = Song {
            song_dir: "Songs/Pack/Song/".to_string(),
            ..Default::default()
        };
        let mut steps = Steps::new(StepsType::DanceSingle, Difficulty::Edit);
        steps.note_data = Some("0000\n".to_string());

        let contents = edit_file_contents(&song, &steps, &BuiltinStepsTypes).unwrap();
        assert!(contents.starts_with("#SONG:Pack/Song;\r\n\r\n//---------------dance-single - "));
        assert!(contents.ends_with("#NOTES:\r\n0000\r\n;"));
    }
}
