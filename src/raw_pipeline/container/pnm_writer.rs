use std::io::Write;

use tracing::debug;

use crate::raw_pipeline::common::error::{ExtractError, Result};
use crate::raw_pipeline::container::mime::{extension_for_mime, mime_type};
use crate::raw_pipeline::container::types::{ContainerFormat, PnmVersion};
use crate::raw_pipeline::container::writer::ContainerWriter;
use crate::raw_pipeline::engine::DataType;
use crate::raw_pipeline::raw::types::{RawData, Thumbnail};

/// Largest sample value a PGM may declare.
const PNM_MAX_VALUE: u64 = 65535;

/// Writes PGM/PPM headers in front of the bitmap bytes, or the bytes alone
/// for compressed encodings. Buffer length is never checked against the
/// dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardContainerWriter;

impl StandardContainerWriter {
    fn write_header(
        output: &mut dyn Write,
        version: PnmVersion,
        width: u32,
        height: u32,
        max_value: u64,
    ) -> Result<()> {
        let header = format!("{version}\n{width} {height}\n{max_value}\n");
        output.write_all(header.as_bytes())?;
        Ok(())
    }
}

/// `2^bits - 1`, clamped to what P5 allows.
pub(crate) fn pgm_max_value(bits_per_channel: u32) -> u64 {
    if bits_per_channel >= 16 {
        PNM_MAX_VALUE
    } else {
        (1u64 << bits_per_channel) - 1
    }
}

impl ContainerWriter for StandardContainerWriter {
    fn thumbnail_format(&self, thumbnail: &Thumbnail) -> Result<ContainerFormat> {
        if let Some(mime) = mime_type(thumbnail.data_type) {
            if let Some(extension) = extension_for_mime(mime) {
                return Ok(ContainerFormat::PassThrough { mime, extension });
            }
        }
        if thumbnail.data_type == DataType::Pixmap8Rgb {
            return Ok(ContainerFormat::Ppm);
        }
        Err(ExtractError::UnsupportedEncoding {
            data_type: thumbnail.data_type,
            width: thumbnail.width,
            height: thumbnail.height,
        })
    }

    fn write_thumbnail(&self, thumbnail: &Thumbnail, output: &mut dyn Write) -> Result<()> {
        let format = self.thumbnail_format(thumbnail)?;
        debug!(
            "Writing {}x{} thumbnail as {:?} ({} bytes)",
            thumbnail.width,
            thumbnail.height,
            format,
            thumbnail.byte_size()
        );

        if format == ContainerFormat::Ppm {
            Self::write_header(output, PnmVersion::P6, thumbnail.width, thumbnail.height, 255)?;
        }
        output.write_all(thumbnail.data())?;
        Ok(())
    }

    fn write_raw(&self, raw: &RawData, output: &mut dyn Write) -> Result<()> {
        let max_value = pgm_max_value(raw.bits_per_channel);
        debug!(
            "Writing {}x{} sensor data as PGM, maxval {} ({} bytes)",
            raw.width,
            raw.height,
            max_value,
            raw.byte_size()
        );

        Self::write_header(output, PnmVersion::P5, raw.width, raw.height, max_value)?;
        output.write_all(raw.data())?;
        Ok(())
    }
}
