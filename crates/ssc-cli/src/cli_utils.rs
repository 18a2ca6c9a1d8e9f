//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use ssc_core::{Config, Song, Steps};
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "ssc.toml";

/// Load a song description from JSON.
pub fn load_song(path: &str) -> Result<Song> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read song file {}", path))?;
    let song: Song = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse song file {}", path))?;
    debug!("Loaded {:?} with {} charts", path, song.steps.len());
    Ok(song)
}

/// Write a song description back as pretty-printed JSON.
pub fn save_song(path: &str, song: &Song) -> Result<()> {
    let content = serde_json::to_string_pretty(song)?;
    fs::write(path, content).with_context(|| format!("Failed to write song file {}", path))?;
    debug!("Saved {:?}", path);
    Ok(())
}

/// Index into the song's charts with a readable error.
pub fn chart(song: &Song, index: usize) -> Result<&Steps> {
    match song.steps.get(index) {
        Some(steps) => Ok(steps),
        None => bail!(
            "Chart {} does not exist (song has {} charts)",
            index,
            song.steps.len()
        ),
    }
}

/// Charts to write: the given indices in order, or all charts.
pub fn select_charts<'a>(song: &'a Song, indices: &[usize]) -> Result<Vec<&'a Steps>> {
    if indices.is_empty() {
        return Ok(song.steps.iter().collect());
    }
    indices.iter().map(|&i| chart(song, i)).collect()
}

/// Load the config from `path`, else `ssc.toml` if present, else defaults.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load(path).with_context(|| format!("Failed to load config {}", path))
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Config::load(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_FILE)),
        None => Ok(Config::default()),
    }
}
