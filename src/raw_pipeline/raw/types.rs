//! Bitmap value types

use std::mem;

use crate::raw_pipeline::engine::DataType;

/// One decoded image plane with its owned byte buffer.
///
/// Dimensions and bit depth are informational: changing them never touches
/// the buffer, and `byte_size` always reports the buffer length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    /// Pixel encoding of `data`
    pub data_type: DataType,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per channel (8, 12, 14, ...)
    pub bits_per_channel: u32,
    data: Vec<u8>,
}

/// Embedded preview image.
pub type Thumbnail = Bitmap;

impl Bitmap {
    pub fn new(data_type: DataType, width: u32, height: u32, bits_per_channel: u32, data: Vec<u8>) -> Self {
        Self {
            data_type,
            width,
            height,
            bits_per_channel,
            data,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Replaces the buffer; `byte_size` follows.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bits_per_channel(&mut self, bits_per_channel: u32) {
        self.bits_per_channel = bits_per_channel;
    }

    /// Exchanges the whole contents of two bitmaps.
    pub fn swap(&mut self, other: &mut Bitmap) {
        mem::swap(self, other);
    }
}

/// Full sensor plane plus the engine-reported sample bounds.
///
/// `min`, `max` and `compression` are carried as reported and are never
/// derived from the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawData {
    pub bitmap: Bitmap,
    pub min: u32,
    pub max: u32,
    pub compression: u32,
}

impl RawData {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            ..Default::default()
        }
    }

    pub fn set_min(&mut self, min: u32) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = max;
    }

    pub fn set_compression(&mut self, compression: u32) {
        self.compression = compression;
    }

    pub fn swap(&mut self, other: &mut RawData) {
        mem::swap(self, other);
    }
}

impl std::ops::Deref for RawData {
    type Target = Bitmap;

    fn deref(&self) -> &Bitmap {
        &self.bitmap
    }
}

impl std::ops::DerefMut for RawData {
    fn deref_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }
}
