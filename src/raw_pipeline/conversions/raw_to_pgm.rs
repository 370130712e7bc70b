use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::raw_pipeline::{
    common::error::Result,
    container::{ContainerFormat, ContainerWriter, StandardContainerWriter},
    conversions::{
        config::ExtractionConfig,
        output::{file_stem, output_path, show, write_file},
        report::ExtractionReport,
        viewer::{SystemViewer, ViewerLauncher},
    },
    engine::{RawEngine, RawLoaderEngine},
    raw::RawFile,
};

/// Exports the full sensor plane of each input as a PGM file.
///
/// The first failure aborts the batch.
pub struct RawDataExtractor<E: RawEngine, W: ContainerWriter, V: ViewerLauncher> {
    engine: E,
    writer: W,
    viewer: V,
    config: ExtractionConfig,
}

impl RawDataExtractor<RawLoaderEngine, StandardContainerWriter, SystemViewer> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            engine: RawLoaderEngine,
            writer: StandardContainerWriter,
            viewer: SystemViewer,
            config,
        }
    }
}

impl<E: RawEngine, W: ContainerWriter, V: ViewerLauncher> RawDataExtractor<E, W, V> {
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
            let written = self.extract_file(input)?;
            report.record_written(written);
        }
        Ok(report)
    }

    /// Writes `<destination>/<stem>.pgm` and returns its path.
    #[instrument(skip(self, input), fields(input = %input.as_ref().display()))]
    pub fn extract_file<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input = input.as_ref();

        let raw_file = {
            let _span = tracing::info_span!("open_raw").entered();
            RawFile::from_path(&self.engine, input, self.config.type_hint)?
        };

        let raw_data = {
            let _span = tracing::info_span!("decode_raw").entered();
            raw_file.raw_data(self.config.decode_options)?
        };

        let name = format!("{}{}", file_stem(input), ContainerFormat::Pgm.suffix());
        let path = output_path(&self.config.destination, &name)?;
        {
            let _span = tracing::info_span!("encode_pgm").entered();
            write_file(&path, |output| self.writer.write_raw(&raw_data, output))?;
        }

        info!(
            width = raw_data.width,
            height = raw_data.height,
            bits = raw_data.bits_per_channel,
            "Wrote {}",
            path.display()
        );

        if self.config.open_in_viewer {
            show(&self.viewer, &path);
        }
        Ok(path)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ExtractionConfig) {
        self.config = config;
    }
}
