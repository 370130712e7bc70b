use std::path::{Path, PathBuf};

use crate::raw_pipeline::engine::DataType;

/// A thumbnail left out because its encoding has no output container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedThumbnail {
    pub source: PathBuf,
    pub data_type: DataType,
    pub width: u32,
    pub height: u32,
}

/// What a driver run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    written: Vec<PathBuf>,
    skipped: Vec<SkippedThumbnail>,
}

impl ExtractionReport {
    /// Output files, in the order they were written.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn skipped(&self) -> &[SkippedThumbnail] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.skipped.is_empty()
    }

    pub(crate) fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub(crate) fn record_skipped(&mut self, source: &Path, data_type: DataType, width: u32, height: u32) {
        self.skipped.push(SkippedThumbnail {
            source: source.to_path_buf(),
            data_type,
            width,
            height,
        });
    }

    pub(crate) fn merge(&mut self, other: ExtractionReport) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
    }
}
