use std::fmt;
use std::path::Path;

use tracing::{debug, instrument};

use crate::raw_pipeline::common::error::{ExtractError, Result};
use crate::raw_pipeline::engine::{DecodeOptions, RawEngine, RawFileType, RawSession};
use crate::raw_pipeline::raw::types::{RawData, Thumbnail};

/// An opened camera RAW file.
///
/// Construction either yields a fully opened handle or fails; dropping the
/// handle releases the engine session.
pub struct RawFile {
    session: Box<dyn RawSession>,
}

impl RawFile {
    /// Opens the file at `path`. With `RawFileType::Unknown` the engine
    /// guesses the format; any other hint forces it.
    #[instrument(skip(engine, path), fields(path = %path.as_ref().display()))]
    pub fn from_path<E: RawEngine, P: AsRef<Path>>(
        engine: &E,
        path: P,
        type_hint: RawFileType,
    ) -> Result<Self> {
        let path = path.as_ref();
        let session = engine
            .open_path(path, type_hint)
            .ok_or_else(|| ExtractError::Open(path.display().to_string()))?;
        debug!("Opened {} as {:?}", path.display(), session.format_tag());
        Ok(Self { session })
    }

    /// Opens an in-memory buffer. Format guessing can only use the content.
    pub fn from_memory<E: RawEngine>(engine: &E, data: &[u8], type_hint: RawFileType) -> Result<Self> {
        let session = engine
            .open_memory(data, type_hint)
            .ok_or_else(|| ExtractError::Open(format!("<memory buffer of {} bytes>", data.len())))?;
        Ok(Self { session })
    }

    pub fn file_type(&self) -> RawFileType {
        self.session.format_tag()
    }

    pub fn orientation(&self) -> i32 {
        self.session.orientation()
    }

    /// Available preview widths, in engine order, duplicates included.
    pub fn thumbnail_widths(&self) -> Vec<u32> {
        self.session.thumbnail_widths()
    }

    /// The preview the engine considers closest to `requested_width`.
    pub fn thumbnail(&self, requested_width: u32) -> Result<Thumbnail> {
        self.session
            .extract_thumbnail(requested_width)
            .map_err(ExtractError::extraction)
    }

    /// One thumbnail per reported width, in order.
    pub fn thumbnails(&self) -> Result<Vec<Thumbnail>> {
        self.thumbnail_widths()
            .into_iter()
            .map(|width| self.thumbnail(width))
            .collect()
    }

    /// Decodes the full sensor plane. Blocks until the engine is done.
    pub fn raw_data(&self, options: DecodeOptions) -> Result<RawData> {
        self.session
            .extract_raw_data(options)
            .map_err(ExtractError::extraction)
    }
}

impl fmt::Debug for RawFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFile")
            .field("file_type", &self.file_type())
            .field("orientation", &self.orientation())
            .field("thumbnail_widths", &self.thumbnail_widths())
            .finish()
    }
}
