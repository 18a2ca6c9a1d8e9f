use std::path::PathBuf;

use thiserror::Error;

use crate::timing::SegmentKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Song file {path:?} couldn't be opened for writing: {message}")]
    OpenFailed { path: PathBuf, message: String },

    #[error("Error writing file '{}'.", .path.display())]
    WriteFailed { path: PathBuf, message: String },

    #[error("Error renaming file.  Destination file '{}' already exists.", .0.display())]
    DestinationExists(PathBuf),

    #[error("Timing data has no {0} segments")]
    EmptySegments(SegmentKind),

    #[error("{0} segments are not sorted by start row")]
    UnsortedSegments(SegmentKind),

    #[error("Invalid note data: {0}")]
    NoteData(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config parse error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures caused by the caller's data rather than storage.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptySegments(_) | Self::UnsortedSegments(_) | Self::NoteData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_exists_message() {
        let err = Error::DestinationExists(PathBuf::from("Save/MachineProfile/Edits/a.edit"));
        assert_eq!(
            err.to_string(),
            "Error renaming file.  Destination file 'Save/MachineProfile/Edits/a.edit' already exists."
        );
    }

    #[test]
    fn test_write_failed_message() {
        let err = Error::WriteFailed {
            path: PathBuf::from("out.edit"),
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Error writing file 'out.edit'.");
    }

    #[test]
    fn test_invariant_violation_classification() {
        assert!(Error::EmptySegments(SegmentKind::Combo).is_invariant_violation());
        assert!(!Error::DestinationExists(PathBuf::new()).is_invariant_violation());
    }
}
