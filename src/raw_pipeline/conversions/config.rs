//! Extraction configuration types

use std::path::PathBuf;

use crate::raw_pipeline::engine::{DecodeOptions, RawFileType};

/// Configuration shared by both extraction drivers
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Directory the output files are written to
    pub destination: PathBuf,
    /// Whether each written file is handed to the system viewer
    pub open_in_viewer: bool,
    /// Options passed to the engine when decoding sensor data
    pub decode_options: DecodeOptions,
    /// Format forced on every input; `Unknown` lets the engine guess
    pub type_hint: RawFileType,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("."),
            open_in_viewer: false,
            decode_options: DecodeOptions::NONE,
            type_hint: RawFileType::Unknown,
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    destination: Option<PathBuf>,
    open_in_viewer: Option<bool>,
    decode_options: Option<DecodeOptions>,
    type_hint: Option<RawFileType>,
}

impl ExtractionConfigBuilder {
    pub fn destination<P: Into<PathBuf>>(mut self, destination: P) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn open_in_viewer(mut self, enable: bool) -> Self {
        self.open_in_viewer = Some(enable);
        self
    }

    pub fn decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode_options = Some(options);
        self
    }

    pub fn type_hint(mut self, hint: RawFileType) -> Self {
        self.type_hint = Some(hint);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            destination: self.destination.unwrap_or(default.destination),
            open_in_viewer: self.open_in_viewer.unwrap_or(default.open_in_viewer),
            decode_options: self.decode_options.unwrap_or(default.decode_options),
            type_hint: self.type_hint.unwrap_or(default.type_hint),
        }
    }
}
