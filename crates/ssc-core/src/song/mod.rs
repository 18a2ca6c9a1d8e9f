//! Song-related types and data structures.
//!
//! This module contains types for representing songs and their charts:
//! - `Song` - global metadata, timing, background timelines, owned charts
//! - `BackgroundChange` - background/foreground timeline entries
//! - `Steps` - one playable chart (`StepsType`, `Difficulty`, `RadarValues`)

mod background;
mod song;
mod steps;

pub use background::*;
pub use song::*;
pub use steps::*;
