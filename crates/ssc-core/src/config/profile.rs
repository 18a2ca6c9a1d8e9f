use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Resolves profile directories for edit-file saves.
pub trait ProfileDirs {
    /// Directory of the machine profile (the shared, non-player profile).
    fn machine_profile_dir(&self) -> PathBuf;
}

/// Writer configuration, usually loaded from `ssc.toml`.
///
/// ```toml
/// machine_profile_dir = "Save/MachineProfile"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub machine_profile_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            machine_profile_dir: PathBuf::from("Save/MachineProfile"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content; missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl ProfileDirs for Config {
    fn machine_profile_dir(&self) -> PathBuf {
        self.machine_profile_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
machine_profile_dir = "/srv/sm/Save/MachineProfile"
"#,
        )
        .unwrap();

        assert_eq!(
            config.machine_profile_dir(),
            PathBuf::from("/srv/sm/Save/MachineProfile")
        );
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.machine_profile_dir, PathBuf::from("Save/MachineProfile"));
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("machine_profile_dir = [");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
