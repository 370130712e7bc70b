//! RAW extraction pipeline module
//!
//! This module is organized bottom-up: the engine boundary, the `RawFile`
//! handle and bitmap types, container encoding, and the extraction drivers.

pub mod common;
pub mod container;
pub mod conversions;
pub mod engine;
pub mod raw;

pub use common::{ExtractError, Result};

pub use engine::{DataType, DecodeOptions, ErrorCode, RawEngine, RawFileType, RawLoaderEngine, RawSession};

pub use raw::{Bitmap, RawData, RawFile, Thumbnail};

pub use container::{ContainerFormat, ContainerWriter, StandardContainerWriter};

pub use conversions::{
    ExtractionConfig, ExtractionConfigBuilder, ExtractionReport, RawDataExtractor, SkippedThumbnail,
    SystemViewer, ThumbnailExtractor, ViewerLauncher,
};
