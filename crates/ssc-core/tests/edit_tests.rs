//! Integration tests for edit-file saves into the machine profile

use std::path::{Path, PathBuf};

use ssc_core::song::{Difficulty, Song, Steps, StepsType};
use ssc_core::storage::MemoryStore;
use ssc_core::storage::mock::StoreOp;
use ssc_core::{Config, Error, OpenMode, SscWriter};
use tempfile::TempDir;

fn make_song() -> Song {
    Song {
        main_title: "Title".to_string(),
        song_dir: "Songs/Pack/Title/".to_string(),
        ..Default::default()
    }
}

fn make_steps(description: &str) -> Steps {
    let mut steps = Steps::new(StepsType::DanceSingle, Difficulty::Edit);
    steps.description = description.to_string();
    steps.meter = 7;
    steps.note_data = Some("1000\n0100\n0010\n0001\n".to_string());
    steps
}

fn edit_path(name: &str) -> PathBuf {
    Path::new("Save/MachineProfile/Edits").join(name)
}

mod machine_profile {
    use super::*;

    #[test]
    fn test_first_save() {
        let store = MemoryStore::new();
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("Mine");

        let path = writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap();

        assert_eq!(path, edit_path("Title - Mine.edit"));
        assert_eq!(
            store.ops(),
            vec![
                StoreOp::Open(path.clone(), OpenMode::Durable),
                StoreOp::Flush(path.clone()),
            ]
        );
        assert!(steps.saved_to_disk);
        assert_eq!(steps.filename(), Some(path.as_path()));

        let content = store.contents(&path).unwrap();
        assert!(content.starts_with("#SONG:Pack/Title;\r\n\r\n//---------------dance-single - Mine"));
        assert!(content.ends_with("0001\r\n;\r\n"));
    }

    #[test]
    fn test_resave_same_name_overwrites() {
        let old = edit_path("Title - Mine.edit");
        let store = MemoryStore::new().with_file(&old, "stale");
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("Mine");
        steps.saved_to_disk = true;
        steps.set_filename(&old);

        writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap();

        assert!(!store.ops().iter().any(|op| matches!(op, StoreOp::Remove(_))));
        assert!(store.contents(&old).unwrap().starts_with("#SONG:"));
    }

    #[test]
    fn test_rename_removes_old_after_flush() {
        let old = edit_path("Title - Old.edit");
        let new = edit_path("Title - New.edit");
        let store = MemoryStore::new().with_file(&old, "old edit");
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("New");
        steps.saved_to_disk = true;
        steps.set_filename(&old);

        let path = writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap();

        assert_eq!(path, new);
        assert_eq!(
            store.ops(),
            vec![
                StoreOp::Open(new.clone(), OpenMode::Durable),
                StoreOp::Flush(new.clone()),
                StoreOp::Remove(old.clone()),
            ]
        );
        assert!(store.contents(&old).is_none());
        assert_eq!(steps.filename(), Some(new.as_path()));
    }

    #[test]
    fn test_rename_onto_existing_file_is_refused() {
        let old = edit_path("Title - Old.edit");
        let taken = edit_path("Title - Taken.edit");
        let store = MemoryStore::new()
            .with_file(&old, "old edit")
            .with_file(&taken, "someone else's edit");
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("Taken");
        steps.saved_to_disk = true;
        steps.set_filename(&old);

        let err = writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap_err();

        assert!(matches!(err, Error::DestinationExists(ref p) if *p == taken));
        assert!(store.ops().is_empty());
        assert_eq!(store.contents(&old).unwrap(), "old edit");
        assert_eq!(store.contents(&taken).unwrap(), "someone else's edit");
        assert_eq!(steps.filename(), Some(old.as_path()));
    }

    #[test]
    fn test_unsaved_edit_may_overwrite() {
        let target = edit_path("Title - Mine.edit");
        let store = MemoryStore::new().with_file(&target, "older copy");
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("Mine");

        writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap();
        assert!(store.contents(&target).unwrap().starts_with("#SONG:"));
    }

    #[test]
    fn test_write_failure_keeps_old_file() {
        let old = edit_path("Title - Old.edit");
        let new = edit_path("Title - New.edit");
        let store = MemoryStore::new()
            .with_file(&old, "old edit")
            .fail_flush(&new);
        let writer = SscWriter::with_store(store.clone());
        let mut steps = make_steps("New");
        steps.saved_to_disk = true;
        steps.set_filename(&old);

        let err = writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap_err();

        assert!(matches!(err, Error::WriteFailed { .. }));
        assert_eq!(store.contents(&old).unwrap(), "old edit");
        assert!(!store.ops().iter().any(|op| matches!(op, StoreOp::Remove(_))));
        assert_eq!(steps.filename(), Some(old.as_path()));
    }

    #[test]
    fn test_doubles_suffix() {
        let store = MemoryStore::new();
        let writer = SscWriter::with_store(store);
        let mut steps = make_steps("Wide");
        steps.steps_type = StepsType::DanceDouble;

        let path = writer
            .write_edit_file_to_machine(&Config::default(), &make_song(), &mut steps)
            .unwrap();
        assert_eq!(path, edit_path("Title - Wide (doubles).edit"));
    }
}

mod on_disk {
    use super::*;

    #[test]
    fn test_save_and_rename() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            machine_profile_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let writer = SscWriter::new();
        let song = make_song();
        let mut steps = make_steps("First");

        let first = writer
            .write_edit_file_to_machine(&config, &song, &mut steps)
            .unwrap();
        assert_eq!(first, temp_dir.path().join("Edits/Title - First.edit"));
        assert!(first.is_file());

        steps.description = "Second".to_string();
        let second = writer
            .write_edit_file_to_machine(&config, &song, &mut steps)
            .unwrap();

        assert!(!first.exists());
        let content = std::fs::read_to_string(&second).unwrap();
        assert!(content.starts_with("#SONG:Pack/Title;\r\n"));
        assert!(content.contains("#DESCRIPTION:Second;\r\n"));
    }
}
