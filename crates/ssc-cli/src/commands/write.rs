//! Write command: song JSON to .ssc.

use std::path::Path;

use anyhow::Result;
use ssc_core::SscWriter;

use crate::cli_utils;

pub fn run(song_path: &str, output: &str, cache: bool, charts: &[usize]) -> Result<()> {
    let song = cli_utils::load_song(song_path)?;
    let steps = cli_utils::select_charts(&song, charts)?;

    SscWriter::new().write(Path::new(output), &song, &steps, cache)?;

    eprintln!("Wrote {} charts to: {}", steps.len(), output);
    Ok(())
}
