use std::path::Path;

use tracing::{info, instrument, warn};

use crate::raw_pipeline::{
    common::error::{ExtractError, Result},
    container::{ContainerWriter, StandardContainerWriter},
    conversions::{
        config::ExtractionConfig,
        output::{file_stem, output_path, show, write_file},
        report::ExtractionReport,
        viewer::{SystemViewer, ViewerLauncher},
    },
    engine::{RawEngine, RawLoaderEngine},
    raw::RawFile,
};

/// Exports every embedded thumbnail of each input.
///
/// Thumbnails with no output container are skipped with a warning; every
/// other failure aborts the batch.
pub struct ThumbnailExtractor<E: RawEngine, W: ContainerWriter, V: ViewerLauncher> {
    engine: E,
    writer: W,
    viewer: V,
    config: ExtractionConfig,
}

impl ThumbnailExtractor<RawLoaderEngine, StandardContainerWriter, SystemViewer> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            engine: RawLoaderEngine,
            writer: StandardContainerWriter,
            viewer: SystemViewer,
            config,
        }
    }
}

impl<E: RawEngine, W: ContainerWriter, V: ViewerLauncher> ThumbnailExtractor<E, W, V> {
    pub fn with_custom(engine: E, writer: W, viewer: V, config: ExtractionConfig) -> Self {
        Self {
            engine,
            writer,
            viewer,
            config,
        }
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub fn extract_all<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<ExtractionReport> {
        let mut report = ExtractionReport::default();
        for input in inputs {
            report.merge(self.extract_file(input)?);
        }
        Ok(report)
    }

    /// Writes `<destination>/<stem>-<w>x<h><suffix>` for each thumbnail.
    #[instrument(skip(self, input), fields(input = %input.as_ref().display()))]
    pub fn extract_file<P: AsRef<Path>>(&self, input: P) -> Result<ExtractionReport> {
        let input = input.as_ref();
        let raw_file = RawFile::from_path(&self.engine, input, self.config.type_hint)?;
        let stem = file_stem(input);
        let mut report = ExtractionReport::default();

        for width in raw_file.thumbnail_widths() {
            let thumbnail = raw_file.thumbnail(width)?;

            let format = match self.writer.thumbnail_format(&thumbnail) {
                Ok(format) => format,
                Err(ExtractError::UnsupportedEncoding {
                    data_type,
                    width,
                    height,
                }) => {
                    warn!(
                        "Skipping {}x{} thumbnail of {}: unsupported encoding {:?}",
                        width,
                        height,
                        input.display(),
                        data_type
                    );
                    report.record_skipped(input, data_type, width, height);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let name = format!(
                "{}-{}x{}{}",
                stem,
                thumbnail.width,
                thumbnail.height,
                format.suffix()
            );
            let path = output_path(&self.config.destination, &name)?;
            write_file(&path, |output| self.writer.write_thumbnail(&thumbnail, output))?;
            info!(bytes = thumbnail.byte_size(), "Wrote {}", path.display());

            if self.config.open_in_viewer {
                show(&self.viewer, &path);
            }
            report.record_written(path);
        }

        Ok(report)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ExtractionConfig) {
        self.config = config;
    }
}
