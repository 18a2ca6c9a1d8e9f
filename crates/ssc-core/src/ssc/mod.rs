//! SSC (StepMania Chart) serialization.
//!
//! This module contains the encoders and writers for the SSC text format:
//! - `timing` - segment timeline tags (`#BPMS`, `#STOPS`, ...)
//! - `background` - `#BGCHANGES`/`#FGCHANGES` timelines
//! - `notes` - per-chart `#NOTEDATA` blocks
//! - `writer` - `SscWriter`, the file write orchestrator
//! - `edit` - standalone edit files and machine-profile saves
//! - `reader` - tag splitting and timing/background decoding

pub mod background;
mod catalog;
pub mod edit;
mod escape;
pub mod notes;
pub mod reader;
pub mod timing;
pub mod writer;

pub use catalog::{BuiltinStepsTypes, StepsTypeCatalog};
pub use edit::{edit_file_contents, edit_file_name, make_valid_filename};
pub use escape::{sm_escape, sm_unescape};
pub use reader::{MsdTag, parse_tags};
pub use writer::SscWriter;
