//! Print the file name an edit would be saved under.

use anyhow::Result;
use ssc_core::ssc::edit_file_name;

use crate::cli_utils;

pub fn run(song_path: &str, chart: usize) -> Result<()> {
    let song = cli_utils::load_song(song_path)?;
    let steps = cli_utils::chart(&song, chart)?;
    println!("{}", edit_file_name(&song, steps));
    Ok(())
}
