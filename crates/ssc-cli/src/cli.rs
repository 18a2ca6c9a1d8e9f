//! CLI argument definitions for ssc.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ssc")]
#[command(about = "StepMania SSC chart writer", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a song (JSON) as an .ssc file
    Write {
        /// Song description in JSON
        song: String,
        /// Output .ssc path
        output: String,
        /// Include the cache tags and open the file in fast mode
        #[arg(long)]
        cache: bool,
        /// Chart indices to write, in order (default: all)
        #[arg(long = "chart", value_name = "INDEX")]
        charts: Vec<usize>,
    },
    /// Save one chart as an edit file
    Edit {
        /// Song description in JSON
        song: String,
        /// Index of the chart to export
        #[arg(long)]
        chart: usize,
        /// Config file with the profile directories
        #[arg(long, value_name = "FILE", env = "SSC_CONFIG")]
        config: Option<String>,
        /// Write to this path instead of the machine profile
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the file name an edit of a chart would get
    EditName {
        /// Song description in JSON
        song: String,
        /// Index of the chart
        #[arg(long)]
        chart: usize,
    },
    /// Summarize the tags and timing of an .ssc file
    Inspect {
        /// .ssc or .edit file
        file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
