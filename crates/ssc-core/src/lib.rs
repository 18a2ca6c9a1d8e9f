pub mod config;
pub mod error;
pub mod song;
pub mod ssc;
pub mod storage;
pub mod timing;

pub use config::{Config, ProfileDirs};
pub use error::{Error, Result};
pub use song::{
    BackgroundChange, Difficulty, DisplayBpm, InstrumentTrack, PlayerNumber, RadarCategory,
    RadarValues, Selectable, Song, Steps, StepsType,
};
pub use ssc::{BuiltinStepsTypes, SscWriter, StepsTypeCatalog};
pub use storage::{DiskStore, FileStore, OpenMode, StoreFile};
pub use timing::{SegmentKind, TimingData};
