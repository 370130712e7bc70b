use std::io::Write;

use crate::raw_pipeline::common::error::Result;
use crate::raw_pipeline::container::types::ContainerFormat;
use crate::raw_pipeline::raw::types::{RawData, Thumbnail};

pub trait ContainerWriter {
    /// Container a thumbnail is written as. Fails with
    /// `ExtractError::UnsupportedEncoding` when there is none.
    fn thumbnail_format(&self, thumbnail: &Thumbnail) -> Result<ContainerFormat>;

    fn write_thumbnail(&self, thumbnail: &Thumbnail, output: &mut dyn Write) -> Result<()>;

    fn write_raw(&self, raw: &RawData, output: &mut dyn Write) -> Result<()>;
}
