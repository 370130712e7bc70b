//! Decoding engine backed by the rawloader library.
//!
//! Sensor data is decoded by rawloader, which supports most TIFF-based
//! formats plus RAF, MRW and CRW. Embedded previews are located by walking
//! the container directly, so listing thumbnails never decodes sensor data.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::raw_pipeline::engine::backend::{RawEngine, RawSession};
use crate::raw_pipeline::engine::consts::{DataType, DecodeOptions, ErrorCode, RawFileType};
use crate::raw_pipeline::engine::container_walk::{PreviewLocation, TiffContainer, raf_previews};
use crate::raw_pipeline::engine::identify::{identify_content, identify_extension};
use crate::raw_pipeline::engine::selector::select_thumbnail;
use crate::raw_pipeline::raw::types::{Bitmap, RawData};

/// Default bit depth when no white level information is available.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 sample type.
const U16_BITS: u32 = 16;

/// Previews are always 8 bits per channel.
const PREVIEW_BITS: u32 = 8;

/// Engine that reads whole files into memory and decodes with rawloader.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawLoaderEngine;

impl RawLoaderEngine {
    fn open_buffer(&self, data: Vec<u8>, hint: RawFileType) -> Option<Box<dyn RawSession>> {
        let file_type = match hint {
            RawFileType::Unknown => identify_content(&data),
            forced => forced,
        };
        if file_type == RawFileType::Unknown {
            debug!("Unrecognized RAW container ({} bytes)", data.len());
            return None;
        }

        let (orientation, previews) = match file_type {
            RawFileType::Raf => (0, raf_previews(&data)?),
            t if t.is_tiff_based() => {
                let container = TiffContainer::parse(&data)?;
                (container.orientation(), container.previews()?)
            }
            _ if data.is_empty() => return None,
            _ => (0, Vec::new()),
        };

        debug!(
            "Opened {:?} container: orientation {}, {} previews",
            file_type,
            orientation,
            previews.len()
        );
        Some(Box::new(RawLoaderSession {
            data,
            file_type,
            orientation,
            previews,
        }))
    }
}

impl RawEngine for RawLoaderEngine {
    fn open_path(&self, path: &Path, hint: RawFileType) -> Option<Box<dyn RawSession>> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        let hint = match hint {
            RawFileType::Unknown => identify_extension(path),
            forced => forced,
        };
        self.open_buffer(data, hint)
    }

    fn open_memory(&self, data: &[u8], hint: RawFileType) -> Option<Box<dyn RawSession>> {
        self.open_buffer(data.to_vec(), hint)
    }
}

/// An opened file: its bytes plus what the container walk found.
struct RawLoaderSession {
    data: Vec<u8>,
    file_type: RawFileType,
    orientation: i32,
    previews: Vec<PreviewLocation>,
}

impl RawSession for RawLoaderSession {
    fn format_tag(&self) -> RawFileType {
        self.file_type
    }

    fn orientation(&self) -> i32 {
        self.orientation
    }

    fn thumbnail_widths(&self) -> Vec<u32> {
        self.previews.iter().map(|p| p.width).collect()
    }

    fn extract_thumbnail(&self, requested_width: u32) -> Result<Bitmap, ErrorCode> {
        let widths = self.thumbnail_widths();
        let index = select_thumbnail(&widths, requested_width).ok_or(ErrorCode::NotFound)?;
        let preview = self.previews[index];
        let bytes = self
            .data
            .get(preview.offset..preview.offset + preview.length)
            .ok_or(ErrorCode::InvalidFormat)?;

        debug!(
            "Selected {}x{} {:?} preview for width {}",
            preview.width, preview.height, preview.data_type, requested_width
        );
        Ok(Bitmap::new(
            preview.data_type,
            preview.width,
            preview.height,
            PREVIEW_BITS,
            bytes.to_vec(),
        ))
    }

    fn extract_raw_data(&self, options: DecodeOptions) -> Result<RawData, ErrorCode> {
        if options.contains(DecodeOptions::DONT_DECOMPRESS) {
            return Err(ErrorCode::NotImplemented);
        }

        debug!("Decoding RAW image, {} bytes", self.data.len());
        let decoded = rawloader::decode(&mut Cursor::new(&self.data)).map_err(|e| {
            debug!("rawloader failed: {}", e);
            ErrorCode::Decompression
        })?;

        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let (samples, bits_per_sample): (Vec<u16>, u32) = match decoded.data {
            RawloaderImageData::Integer(values) => (values, bits_for_white_level(max_white_level)),
            // Float data is normalized to 0.0-1.0 and rescaled to the full u16 range
            RawloaderImageData::Float(values) => (
                values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
                    .collect(),
                DEFAULT_BITS_PER_SAMPLE,
            ),
        };

        let min_black_level = decoded.blacklevels.iter().min().copied().unwrap_or(0);

        debug!(
            "Decoded {}x{}, {} bits per sample (white {}, black {})",
            decoded.width, decoded.height, bits_per_sample, max_white_level, min_black_level
        );

        let data_type = if decoded.cpp == 3 {
            DataType::Pixmap16Rgb
        } else {
            DataType::Raw
        };
        let mut raw = RawData::new(Bitmap::new(
            data_type,
            decoded.width as u32,
            decoded.height as u32,
            bits_per_sample,
            pack_samples(&samples, bits_per_sample),
        ));
        raw.set_min(min_black_level as u32);
        raw.set_max(max_white_level as u32);
        raw.set_compression(0);
        Ok(raw)
    }
}

/// Minimum bits needed to hold the white level, e.g. 16383 needs 14.
fn bits_for_white_level(white_level: u16) -> u32 {
    if white_level == 0 {
        DEFAULT_BITS_PER_SAMPLE
    } else {
        U16_BITS - white_level.leading_zeros()
    }
}

/// One byte per sample up to 8 bits, otherwise two bytes, MSB first.
/// Narrowed samples saturate at 255, rawloader does not clamp to the white level.
fn pack_samples(samples: &[u16], bits_per_sample: u32) -> Vec<u8> {
    if bits_per_sample <= 8 {
        samples.iter().map(|&s| s.min(u8::MAX as u16) as u8).collect()
    } else {
        samples.iter().flat_map(|s| s.to_be_bytes()).collect()
    }
}
