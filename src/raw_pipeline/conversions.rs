//! Extraction drivers
//!
//! Batch operations that open RAW files, pull bitmaps out of them and write
//! them to disk.

pub mod config;
mod output;
mod raw_to_pgm;
pub mod report;
mod thumbnails;
pub mod viewer;


pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use raw_to_pgm::RawDataExtractor;
pub use report::{ExtractionReport, SkippedThumbnail};
pub use thumbnails::ThumbnailExtractor;
pub use viewer::{SystemViewer, ViewerLauncher};
