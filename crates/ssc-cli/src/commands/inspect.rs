//! Inspect command: summarize an .ssc or .edit file.

use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use ssc_core::TimingData;
use ssc_core::ssc::reader::{MsdTag, find_tag, read_background_changes, read_timing};
use ssc_core::ssc::parse_tags;

#[derive(Debug, Default, Serialize)]
pub struct ChartSummary {
    pub steps_type: String,
    pub difficulty: String,
    pub meter: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub version: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub song: Option<String>,
    pub has_cache_tags: bool,
    pub background_changes: usize,
    pub timing: TimingData,
    pub charts: Vec<ChartSummary>,
}

fn tag_value(tags: &[MsdTag], name: &str) -> Option<String> {
    find_tag(tags, name).map(|t| t.value().to_string())
}

/// Chart-level tags follow each `#NOTEDATA` tag.
fn collect_charts(tags: &[MsdTag]) -> Vec<ChartSummary> {
    let mut charts: Vec<ChartSummary> = Vec::new();
    for tag in tags {
        let name = tag.name().to_ascii_uppercase();
        if name == "NOTEDATA" {
            charts.push(ChartSummary::default());
            continue;
        }
        let Some(chart) = charts.last_mut() else {
            continue;
        };
        let value = tag.value().to_string();
        match name.as_str() {
            "STEPSTYPE" => chart.steps_type = value,
            "DIFFICULTY" => chart.difficulty = value,
            "METER" => chart.meter = value,
            "DESCRIPTION" => chart.description = value,
            _ => {}
        }
    }
    charts
}

pub fn summarize(text: &str) -> Result<FileSummary> {
    let tags = parse_tags(text);
    let background_changes = match find_tag(&tags, "BGCHANGES") {
        Some(tag) => read_background_changes(&tag.joined_value())?.0.len(),
        None => 0,
    };

    Ok(FileSummary {
        version: tag_value(&tags, "VERSION"),
        title: tag_value(&tags, "TITLE"),
        artist: tag_value(&tags, "ARTIST"),
        song: tag_value(&tags, "SONG"),
        has_cache_tags: text.contains("// cache tags:"),
        background_changes,
        timing: read_timing(&tags)?,
        charts: collect_charts(&tags),
    })
}

pub fn run(file: &str, json: bool) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
    let summary = summarize(&text).with_context(|| format!("Failed to decode {}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(title) = &summary.title {
        println!("Title:     {}", title);
    }
    if let Some(artist) = &summary.artist {
        println!("Artist:    {}", artist);
    }
    if let Some(song) = &summary.song {
        println!("Song:      {}", song);
    }
    if let Some(version) = &summary.version {
        println!("Version:   {}", version);
    }
    println!("Cache:     {}", if summary.has_cache_tags { "yes" } else { "no" });
    println!("Offset:    {:.6}", summary.timing.beat0_offset_seconds);
    println!(
        "Segments:  {} BPM, {} stops/delays, {} warps, {} labels",
        summary.timing.bpms.len(),
        summary.timing.stops.len(),
        summary.timing.warps.len(),
        summary.timing.labels.len()
    );
    println!("BG changes: {}", summary.background_changes);
    println!("Charts:    {}", summary.charts.len());
    for chart in &summary.charts {
        println!(
            "  {:<14} {:<10} {:>3}  {}",
            chart.steps_type, chart.difficulty, chart.meter, chart.description
        );
    }
    Ok(())
}
