//! Edit command: export one chart as an edit file.
//!
//! Machine profile saves record the edit's file name and saved flag on the
//! chart and write the song JSON back, so a later save under a new name
//! replaces the previous file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ssc_core::SscWriter;

use crate::cli_utils;

pub fn run(
    song_path: &str,
    chart: usize,
    config: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let path = save(song_path, chart, config, output)?;
    println!("{}", path.display());
    Ok(())
}

fn save(
    song_path: &str,
    chart: usize,
    config: Option<&str>,
    output: Option<&str>,
) -> Result<PathBuf> {
    let mut song = cli_utils::load_song(song_path)?;
    let mut steps = cli_utils::chart(&song, chart)?.clone();
    let writer = SscWriter::new();

    if let Some(output) = output {
        writer.write_edit_file(Path::new(output), &song, &steps)?;
        return Ok(Path::new(output).to_path_buf());
    }

    let config = cli_utils::load_config(config)?;
    let path = writer.write_edit_file_to_machine(&config, &song, &mut steps)?;
    song.steps[chart] = steps;
    cli_utils::save_song(song_path, &song)?;
    Ok(path)
}
