//! TIFF-family and RAF container walking.
//!
//! Most camera RAW formats are TIFF files with extra IFDs. This module walks
//! the IFD chain and the SubIFDs, and records where the embedded previews sit
//! so the session can copy them out later without re-parsing.

use std::collections::HashSet;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::raw_pipeline::engine::consts::DataType;

const TIFF_MAGIC_LE: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];
const TIFF_MAGIC_BE: [u8; 4] = [0x4D, 0x4D, 0x00, 0x2A];
const ORF_MAGIC: [u8; 4] = [0x49, 0x49, 0x52, 0x4F];
const RW2_MAGIC: [u8; 4] = [0x49, 0x49, 0x55, 0x00];
pub(crate) const RAF_MAGIC: &[u8; 16] = b"FUJIFILMCCD-RAW ";

pub(crate) const TAG_PANASONIC_JPEG: u16 = 0x002E;
pub(crate) const TAG_IMAGE_WIDTH: u16 = 0x0100;
pub(crate) const TAG_IMAGE_LENGTH: u16 = 0x0101;
pub(crate) const TAG_BITS_PER_SAMPLE: u16 = 0x0102;
pub(crate) const TAG_COMPRESSION: u16 = 0x0103;
pub(crate) const TAG_PHOTOMETRIC: u16 = 0x0106;
pub(crate) const TAG_MAKE: u16 = 0x010F;
pub(crate) const TAG_STRIP_OFFSETS: u16 = 0x0111;
pub(crate) const TAG_ORIENTATION: u16 = 0x0112;
pub(crate) const TAG_SAMPLES_PER_PIXEL: u16 = 0x0115;
pub(crate) const TAG_STRIP_BYTE_COUNTS: u16 = 0x0117;
pub(crate) const TAG_SUBIFDS: u16 = 0x014A;
pub(crate) const TAG_JPEG_OFFSET: u16 = 0x0201;
pub(crate) const TAG_JPEG_LENGTH: u16 = 0x0202;
pub(crate) const TAG_DNG_VERSION: u16 = 0xC612;

const COMPRESSION_NONE: u32 = 1;
const COMPRESSION_JPEG_OLD: u32 = 6;
const COMPRESSION_JPEG: u32 = 7;

const PHOTOMETRIC_RGB: u32 = 2;
const PHOTOMETRIC_CFA: u32 = 32803;
const PHOTOMETRIC_LINEAR_RAW: u32 = 34892;

const MAX_IFD_ENTRIES: u16 = 1000;
const MAX_IFDS: usize = 64;

const RAF_JPEG_OFFSET_POS: usize = 84;

/// One IFD entry, with its value field kept as raw bytes.
#[derive(Debug, Clone)]
pub(crate) struct IfdEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    value: [u8; 4],
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Ifd {
    pub entries: Vec<IfdEntry>,
    pub next: u32,
}

impl Ifd {
    pub fn entry(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }
}

/// Size in bytes of one value of a TIFF field type.
fn type_size(field_type: u16) -> Option<usize> {
    match field_type {
        1 | 2 | 6 | 7 => Some(1),
        3 | 8 => Some(2),
        4 | 9 | 11 | 13 => Some(4),
        5 | 10 | 12 => Some(8),
        _ => None,
    }
}

/// Bounds-checked sub-slice. Empty ranges are rejected.
pub(crate) fn extract_slice(data: &[u8], offset: usize, length: usize) -> Option<&[u8]> {
    if length == 0 || offset.checked_add(length)? > data.len() {
        return None;
    }
    Some(&data[offset..offset + length])
}

/// A parsed TIFF header over a borrowed file buffer.
pub(crate) struct TiffContainer<'a> {
    data: &'a [u8],
    little_endian: bool,
    first_ifd: u32,
}

impl<'a> TiffContainer<'a> {
    /// Accepts classic TIFF in both byte orders, plus the Olympus and
    /// Panasonic variants of the little-endian header.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let header = data.get(..8)?;
        let little_endian = if header.starts_with(&TIFF_MAGIC_LE)
            || header.starts_with(&ORF_MAGIC)
            || header.starts_with(&RW2_MAGIC)
        {
            true
        } else if header.starts_with(&TIFF_MAGIC_BE) {
            false
        } else {
            return None;
        };
        let mut container = TiffContainer {
            data,
            little_endian,
            first_ifd: 0,
        };
        container.first_ifd = container.read_u32(4)?;
        Some(container)
    }

    pub fn is_panasonic(&self) -> bool {
        self.data.starts_with(&RW2_MAGIC)
    }

    fn read_u16(&self, offset: usize) -> Option<u16> {
        let bytes: [u8; 2] = self.data.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
        Some(self.u16_from(bytes))
    }

    fn read_u32(&self, offset: usize) -> Option<u32> {
        let bytes: [u8; 4] = self.data.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(self.u32_from(bytes))
    }

    fn u16_from(&self, bytes: [u8; 2]) -> u16 {
        if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        }
    }

    fn u32_from(&self, bytes: [u8; 4]) -> u32 {
        if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        }
    }

    /// Reads the IFD at `offset`. A truncated next-IFD pointer ends the chain.
    pub fn read_ifd(&self, offset: u32) -> Option<Ifd> {
        let offset = offset as usize;
        let entry_count = self.read_u16(offset)?;
        if entry_count > MAX_IFD_ENTRIES {
            debug!("IFD at {} claims {} entries, ignoring", offset, entry_count);
            return None;
        }

        let mut entries = Vec::with_capacity(entry_count as usize);
        for i in 0..entry_count as usize {
            let pos = offset + 2 + i * 12;
            let tag = self.read_u16(pos)?;
            let field_type = self.read_u16(pos + 2)?;
            let count = self.read_u32(pos + 4)?;
            let value: [u8; 4] = self.data.get(pos + 8..pos + 12)?.try_into().ok()?;
            entries.push(IfdEntry {
                tag,
                field_type,
                count,
                value,
            });
        }

        let next = self
            .read_u32(offset + 2 + entry_count as usize * 12)
            .unwrap_or(0);
        Some(Ifd { entries, next })
    }

    pub fn ifd0(&self) -> Option<Ifd> {
        self.read_ifd(self.first_ifd)
    }

    /// All IFDs reachable from the header: the main chain first, then the
    /// SubIFDs in discovery order. Fails only when IFD0 itself is unreadable.
    pub fn walk(&self) -> Option<Vec<Ifd>> {
        let ifd0 = self.ifd0()?;
        let mut visited = HashSet::from([self.first_ifd]);
        let mut pending = Vec::new();
        let mut ifds = Vec::new();

        let mut next = ifd0.next;
        ifds.push(ifd0);
        while next != 0 && ifds.len() < MAX_IFDS && visited.insert(next) {
            match self.read_ifd(next) {
                Some(ifd) => {
                    next = ifd.next;
                    ifds.push(ifd);
                }
                None => break,
            }
        }

        let mut cursor = 0;
        while cursor < ifds.len() {
            if let Some(entry) = ifds[cursor].entry(TAG_SUBIFDS) {
                pending.extend(self.values(entry));
            }
            for offset in pending.drain(..) {
                if ifds.len() >= MAX_IFDS || !visited.insert(offset) {
                    continue;
                }
                if let Some(ifd) = self.read_ifd(offset) {
                    ifds.push(ifd);
                }
            }
            cursor += 1;
        }

        debug!("Walked {} IFDs", ifds.len());
        Some(ifds)
    }

    /// Integer values of a BYTE, SHORT, LONG or IFD entry.
    pub fn values(&self, entry: &IfdEntry) -> Vec<u32> {
        let size = match type_size(entry.field_type) {
            Some(size) => size,
            None => return Vec::new(),
        };
        let total = match size.checked_mul(entry.count as usize) {
            Some(total) => total,
            None => return Vec::new(),
        };
        let bytes = if total <= 4 {
            &entry.value[..total]
        } else {
            match extract_slice(self.data, self.u32_from(entry.value) as usize, total) {
                Some(bytes) => bytes,
                None => return Vec::new(),
            }
        };

        match entry.field_type {
            1 | 7 => bytes.iter().map(|&b| b as u32).collect(),
            3 => bytes
                .chunks_exact(2)
                .map(|c| self.u16_from([c[0], c[1]]) as u32)
                .collect(),
            4 | 13 => bytes
                .chunks_exact(4)
                .map(|c| self.u32_from([c[0], c[1], c[2], c[3]]))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn value(&self, ifd: &Ifd, tag: u16) -> Option<u32> {
        ifd.entry(tag)
            .and_then(|entry| self.values(entry).first().copied())
    }

    /// ASCII value with the trailing NULs removed.
    pub fn ascii(&self, ifd: &Ifd, tag: u16) -> Option<String> {
        let entry = ifd.entry(tag)?;
        if entry.field_type != 2 {
            return None;
        }
        let bytes = if entry.count <= 4 {
            &entry.value[..entry.count as usize]
        } else {
            extract_slice(self.data, self.u32_from(entry.value) as usize, entry.count as usize)?
        };
        let text = String::from_utf8_lossy(bytes);
        Some(text.trim_end_matches('\0').to_string())
    }

    /// TIFF orientation from IFD0, 0 when absent.
    pub fn orientation(&self) -> i32 {
        self.ifd0()
            .and_then(|ifd| self.value(&ifd, TAG_ORIENTATION))
            .map(|o| o as i32)
            .unwrap_or(0)
    }

    /// Embedded previews, in walk order. Identical locations are listed once.
    pub fn previews(&self) -> Option<Vec<PreviewLocation>> {
        let ifds = self.walk()?;
        let mut seen = HashSet::new();
        let mut previews = Vec::new();

        for (index, ifd) in ifds.iter().enumerate() {
            let found = if index == 0 && self.is_panasonic() {
                self.panasonic_preview(ifd).or_else(|| self.ifd_preview(ifd))
            } else {
                self.ifd_preview(ifd)
            };
            if let Some(preview) = found {
                if seen.insert((preview.offset, preview.length)) {
                    debug!(
                        "Found {:?} preview {}x{} at {} ({} bytes)",
                        preview.data_type, preview.width, preview.height, preview.offset, preview.length
                    );
                    previews.push(preview);
                }
            }
        }
        Some(previews)
    }

    fn panasonic_preview(&self, ifd: &Ifd) -> Option<PreviewLocation> {
        let entry = ifd.entry(TAG_PANASONIC_JPEG)?;
        let size = type_size(entry.field_type)?.checked_mul(entry.count as usize)?;
        if size <= 4 {
            return None;
        }
        jpeg_preview(self.data, self.u32_from(entry.value) as usize, size)
    }

    fn ifd_preview(&self, ifd: &Ifd) -> Option<PreviewLocation> {
        let photometric = self.value(ifd, TAG_PHOTOMETRIC);
        if matches!(photometric, Some(PHOTOMETRIC_CFA) | Some(PHOTOMETRIC_LINEAR_RAW)) {
            return None;
        }

        if let (Some(offset), Some(length)) = (
            self.value(ifd, TAG_JPEG_OFFSET),
            self.value(ifd, TAG_JPEG_LENGTH),
        ) {
            if let Some(preview) = jpeg_preview(self.data, offset as usize, length as usize) {
                return Some(preview);
            }
        }

        let (offset, length) = self.contiguous_strips(ifd)?;
        match self.value(ifd, TAG_COMPRESSION).unwrap_or(COMPRESSION_NONE) {
            COMPRESSION_JPEG | COMPRESSION_JPEG_OLD => jpeg_preview(self.data, offset, length),
            COMPRESSION_NONE => self.rgb_preview(ifd, photometric, offset, length),
            _ => None,
        }
    }

    fn rgb_preview(
        &self,
        ifd: &Ifd,
        photometric: Option<u32>,
        offset: usize,
        length: usize,
    ) -> Option<PreviewLocation> {
        if photometric != Some(PHOTOMETRIC_RGB) || self.value(ifd, TAG_SAMPLES_PER_PIXEL) != Some(3) {
            return None;
        }
        let bits = ifd
            .entry(TAG_BITS_PER_SAMPLE)
            .map(|entry| self.values(entry))
            .unwrap_or_default();
        if bits.is_empty() || bits.iter().any(|&b| b != 8) {
            return None;
        }
        let width = self.value(ifd, TAG_IMAGE_WIDTH)?;
        let height = self.value(ifd, TAG_IMAGE_LENGTH)?;
        let expected = (width as usize).checked_mul(height as usize)?.checked_mul(3)?;
        if expected == 0 || length < expected {
            return None;
        }
        Some(PreviewLocation {
            data_type: DataType::Pixmap8Rgb,
            width,
            height,
            offset,
            length: expected,
        })
    }

    /// Offset and total length of the IFD's strips, when they are back to
    /// back inside the file.
    fn contiguous_strips(&self, ifd: &Ifd) -> Option<(usize, usize)> {
        let offsets = self.values(ifd.entry(TAG_STRIP_OFFSETS)?);
        let counts = self.values(ifd.entry(TAG_STRIP_BYTE_COUNTS)?);
        if offsets.is_empty() || offsets.len() != counts.len() {
            return None;
        }
        let start = offsets[0] as usize;
        let mut end = start;
        for (&offset, &count) in offsets.iter().zip(&counts) {
            if offset as usize != end {
                return None;
            }
            end = end.checked_add(count as usize)?;
        }
        extract_slice(self.data, start, end - start)?;
        Some((start, end - start))
    }
}

/// Where an embedded preview lives inside the file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PreviewLocation {
    pub data_type: DataType,
    pub width: u32,
    pub height: u32,
    pub offset: usize,
    pub length: usize,
}

/// The JPEG preview referenced from a RAF header.
pub(crate) fn raf_previews(data: &[u8]) -> Option<Vec<PreviewLocation>> {
    if !data.starts_with(RAF_MAGIC) {
        return None;
    }
    let field = data.get(RAF_JPEG_OFFSET_POS..RAF_JPEG_OFFSET_POS + 8)?;
    let offset = u32::from_be_bytes([field[0], field[1], field[2], field[3]]) as usize;
    let length = u32::from_be_bytes([field[4], field[5], field[6], field[7]]) as usize;
    Some(jpeg_preview(data, offset, length).into_iter().collect())
}

fn jpeg_preview(data: &[u8], offset: usize, length: usize) -> Option<PreviewLocation> {
    let payload = extract_slice(data, offset, length)?;
    if !payload.starts_with(&[0xFF, 0xD8]) || is_lossless_jpeg(payload) {
        return None;
    }
    let (width, height) = jpeg_dimensions(payload)?;
    Some(PreviewLocation {
        data_type: DataType::Jpeg,
        width,
        height,
        offset,
        length,
    })
}

/// Reads the frame size from the JPEG header without decoding the scan.
pub(crate) fn jpeg_dimensions(payload: &[u8]) -> Option<(u32, u32)> {
    ImageReader::with_format(Cursor::new(payload), ImageFormat::Jpeg)
        .into_dimensions()
        .map_err(|e| debug!("Unreadable JPEG header: {}", e))
        .ok()
}

/// Lossless JPEG (SOF3 and its variants) carries sensor data, not a preview.
pub(crate) fn is_lossless_jpeg(payload: &[u8]) -> bool {
    let mut pos = 2;
    while pos + 4 <= payload.len() {
        if payload[pos] != 0xFF {
            return false;
        }
        let marker = payload[pos + 1];
        match marker {
            0xFF => {
                pos += 1;
                continue;
            }
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xC3 | 0xC7 | 0xCB | 0xCF => return true,
            0xC0..=0xCF if marker != 0xC4 && marker != 0xC8 && marker != 0xCC => return false,
            0xDA | 0xD9 => return false,
            _ => {}
        }
        let length = u16::from_be_bytes([payload[pos + 2], payload[pos + 3]]) as usize;
        pos += 2 + length;
    }
    false
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 1x1 baseline JPEG.
    pub(crate) const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    /// Little-endian TIFF builder for test fixtures. Each IFD is a list of
    /// (tag, type, values); payload blobs are appended after the IFDs.
    pub(crate) struct TiffBuilder {
        ifds: Vec<Vec<(u16, u16, Vec<u32>)>>,
        blobs: Vec<Vec<u8>>,
    }

    impl TiffBuilder {
        pub fn new() -> Self {
            TiffBuilder {
                ifds: Vec::new(),
                blobs: Vec::new(),
            }
        }

        pub fn ifd(mut self, entries: Vec<(u16, u16, Vec<u32>)>) -> Self {
            self.ifds.push(entries);
            self
        }

        /// Registers a payload; returns the placeholder that `build` swaps
        /// for the blob's absolute offset.
        pub fn blob(&mut self, bytes: &[u8]) -> u32 {
            self.blobs.push(bytes.to_vec());
            BLOB_BASE + self.blobs.len() as u32 - 1
        }

        /// Lays out header, chained IFDs, then blobs.
        pub fn build(self) -> Vec<u8> {
            let ifd_sizes: Vec<usize> = self
                .ifds
                .iter()
                .map(|entries| 2 + entries.len() * 12 + 4)
                .collect();
            let extra_sizes: Vec<usize> = self
                .ifds
                .iter()
                .map(|entries| {
                    entries
                        .iter()
                        .map(|(_, ty, values)| {
                            let size = type_size(*ty).unwrap_or(1) * values.len();
                            if size > 4 { size } else { 0 }
                        })
                        .sum()
                })
                .collect();

            let mut ifd_offsets = Vec::new();
            let mut pos = 8usize;
            for (size, extra) in ifd_sizes.iter().zip(&extra_sizes) {
                ifd_offsets.push(pos);
                pos += size + extra;
            }
            let mut blob_offsets = Vec::new();
            for blob in &self.blobs {
                blob_offsets.push(pos);
                pos += blob.len();
            }
            let resolve = |v: u32| -> u32 {
                if v >= BLOB_BASE && ((v - BLOB_BASE) as usize) < blob_offsets.len() {
                    blob_offsets[(v - BLOB_BASE) as usize] as u32
                } else {
                    v
                }
            };

            let mut out = Vec::with_capacity(pos);
            out.extend_from_slice(&TIFF_MAGIC_LE);
            out.extend_from_slice(&(ifd_offsets.first().copied().unwrap_or(0) as u32).to_le_bytes());

            for (index, entries) in self.ifds.iter().enumerate() {
                let base = ifd_offsets[index];
                let mut extra_pos = base + ifd_sizes[index];
                let mut extra = Vec::new();
                out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
                for (tag, ty, values) in entries {
                    let encoded = encode_values(*ty, values, &resolve);
                    out.extend_from_slice(&tag.to_le_bytes());
                    out.extend_from_slice(&ty.to_le_bytes());
                    out.extend_from_slice(&(values.len() as u32).to_le_bytes());
                    if encoded.len() <= 4 {
                        let mut inline = [0u8; 4];
                        inline[..encoded.len()].copy_from_slice(&encoded);
                        out.extend_from_slice(&inline);
                    } else {
                        out.extend_from_slice(&(extra_pos as u32).to_le_bytes());
                        extra_pos += encoded.len();
                        extra.extend_from_slice(&encoded);
                    }
                }
                let next = ifd_offsets.get(index + 1).copied().unwrap_or(0) as u32;
                out.extend_from_slice(&next.to_le_bytes());
                out.extend_from_slice(&extra);
            }
            for blob in &self.blobs {
                out.extend_from_slice(blob);
            }
            out
        }
    }

    const BLOB_BASE: u32 = 0x4000_0000;

    fn encode_values(ty: u16, values: &[u32], resolve: &dyn Fn(u32) -> u32) -> Vec<u8> {
        let mut out = Vec::new();
        for &v in values {
            let v = resolve(v);
            match ty {
                1 | 2 | 7 => out.push(v as u8),
                3 => out.extend_from_slice(&(v as u16).to_le_bytes()),
                _ => out.extend_from_slice(&v.to_le_bytes()),
            }
        }
        out
    }

    pub(crate) fn ascii(text: &str) -> Vec<u32> {
        text.bytes().chain(std::iter::once(0)).map(|b| b as u32).collect()
    }

    /// IFD0 with an RGB strip and orientation, IFD1 with a JPEG thumbnail.
    pub(crate) fn sample_tiff(make: &str) -> Vec<u8> {
        let mut builder = TiffBuilder::new();
        let rgb: Vec<u8> = (0..4 * 3 * 3).map(|i| i as u8).collect();
        let strip = builder.blob(&rgb);
        let jpeg = builder.blob(MINIMAL_JPEG);
        builder
            .ifd(vec![
                (TAG_IMAGE_WIDTH, 3, vec![4]),
                (TAG_IMAGE_LENGTH, 3, vec![3]),
                (TAG_BITS_PER_SAMPLE, 3, vec![8, 8, 8]),
                (TAG_COMPRESSION, 3, vec![1]),
                (TAG_PHOTOMETRIC, 3, vec![2]),
                (TAG_MAKE, 2, ascii(make)),
                (TAG_STRIP_OFFSETS, 4, vec![strip]),
                (TAG_ORIENTATION, 3, vec![6]),
                (TAG_SAMPLES_PER_PIXEL, 3, vec![3]),
                (TAG_STRIP_BYTE_COUNTS, 4, vec![rgb.len() as u32]),
            ])
            .ifd(vec![
                (TAG_COMPRESSION, 3, vec![6]),
                (TAG_JPEG_OFFSET, 4, vec![jpeg]),
                (TAG_JPEG_LENGTH, 4, vec![MINIMAL_JPEG.len() as u32]),
            ])
            .build()
    }

    #[test]
    fn test_parse_rejects_non_tiff() {
        assert!(TiffContainer::parse(b"not a tiff file").is_none());
        assert!(TiffContainer::parse(&[0x49, 0x49, 0x2A]).is_none());
    }

    #[test]
    fn test_parse_accepts_variant_headers() {
        let mut data = sample_tiff("SONY");
        assert!(TiffContainer::parse(&data).is_some());
        data[..4].copy_from_slice(&ORF_MAGIC);
        assert!(TiffContainer::parse(&data).is_some());
        data[..4].copy_from_slice(&RW2_MAGIC);
        let container = TiffContainer::parse(&data).unwrap();
        assert!(container.is_panasonic());
    }

    #[test]
    fn test_orientation_and_make() {
        let data = sample_tiff("NIKON CORPORATION");
        let container = TiffContainer::parse(&data).unwrap();
        assert_eq!(container.orientation(), 6);
        let ifd0 = container.ifd0().unwrap();
        assert_eq!(
            container.ascii(&ifd0, TAG_MAKE).as_deref(),
            Some("NIKON CORPORATION")
        );
    }

    #[test]
    fn test_orientation_defaults_to_zero() {
        let data = TiffBuilder::new()
            .ifd(vec![(TAG_IMAGE_WIDTH, 3, vec![1])])
            .build();
        let container = TiffContainer::parse(&data).unwrap();
        assert_eq!(container.orientation(), 0);
    }

    #[test]
    fn test_previews_in_walk_order() {
        let data = sample_tiff("SONY");
        let container = TiffContainer::parse(&data).unwrap();
        let previews = container.previews().unwrap();

        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].data_type, DataType::Pixmap8Rgb);
        assert_eq!((previews[0].width, previews[0].height), (4, 3));
        assert_eq!(previews[0].length, 36);
        assert_eq!(previews[1].data_type, DataType::Jpeg);
        assert_eq!((previews[1].width, previews[1].height), (1, 1));
        assert_eq!(previews[1].length, MINIMAL_JPEG.len());
        assert_eq!(
            &data[previews[1].offset..previews[1].offset + previews[1].length],
            MINIMAL_JPEG
        );
    }

    #[test]
    fn test_panasonic_jpeg_tag_in_ifd0() {
        let mut data = TiffBuilder::new()
            .ifd(vec![
                (TAG_PANASONIC_JPEG, 7, MINIMAL_JPEG.iter().map(|&b| b as u32).collect()),
                (TAG_ORIENTATION, 3, vec![1]),
            ])
            .build();
        data[..4].copy_from_slice(&RW2_MAGIC);

        let container = TiffContainer::parse(&data).unwrap();
        assert!(container.is_panasonic());
        let previews = container.previews().unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].data_type, DataType::Jpeg);
        assert_eq!((previews[0].width, previews[0].height), (1, 1));
        assert_eq!(
            &data[previews[0].offset..previews[0].offset + previews[0].length],
            MINIMAL_JPEG
        );
    }

    #[test]
    fn test_cfa_ifd_is_not_a_preview() {
        let mut builder = TiffBuilder::new();
        let strip = builder.blob(&[0u8; 16]);
        let data = builder
            .ifd(vec![
                (TAG_IMAGE_WIDTH, 3, vec![4]),
                (TAG_IMAGE_LENGTH, 3, vec![2]),
                (TAG_BITS_PER_SAMPLE, 3, vec![8]),
                (TAG_COMPRESSION, 3, vec![1]),
                (TAG_PHOTOMETRIC, 3, vec![PHOTOMETRIC_CFA]),
                (TAG_STRIP_OFFSETS, 4, vec![strip]),
                (TAG_SAMPLES_PER_PIXEL, 3, vec![1]),
                (TAG_STRIP_BYTE_COUNTS, 4, vec![16]),
            ])
            .build();
        let container = TiffContainer::parse(&data).unwrap();
        assert!(container.previews().unwrap().is_empty());
    }

    #[test]
    fn test_subifd_previews_are_found() {
        let mut builder = TiffBuilder::new();
        let jpeg = builder.blob(MINIMAL_JPEG);
        // IFD1 doubles as the SubIFD target; it must be listed once.
        let data = builder
            .ifd(vec![(TAG_SUBIFDS, 13, vec![8 + 18])])
            .ifd(vec![
                (TAG_COMPRESSION, 3, vec![7]),
                (TAG_STRIP_OFFSETS, 4, vec![jpeg]),
                (TAG_STRIP_BYTE_COUNTS, 4, vec![MINIMAL_JPEG.len() as u32]),
            ])
            .build();
        let container = TiffContainer::parse(&data).unwrap();
        assert_eq!(container.walk().unwrap().len(), 2);
        let previews = container.previews().unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].data_type, DataType::Jpeg);
    }

    #[test]
    fn test_self_referencing_chain_terminates() {
        let mut data = TiffBuilder::new()
            .ifd(vec![(TAG_IMAGE_WIDTH, 3, vec![1])])
            .build();
        // Point IFD0's next pointer back at itself.
        let next_pos = 8 + 2 + 12;
        data[next_pos..next_pos + 4].copy_from_slice(&8u32.to_le_bytes());
        let container = TiffContainer::parse(&data).unwrap();
        assert_eq!(container.walk().unwrap().len(), 1);
    }

    #[test]
    fn test_lossless_jpeg_detection() {
        assert!(!is_lossless_jpeg(MINIMAL_JPEG));
        let lossless = [
            0xFF, 0xD8, 0xFF, 0xC4, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC3, 0x00, 0x0B, 0x08,
        ];
        assert!(is_lossless_jpeg(&lossless));
    }

    #[test]
    fn test_jpeg_dimensions() {
        assert_eq!(jpeg_dimensions(MINIMAL_JPEG), Some((1, 1)));
        assert_eq!(jpeg_dimensions(&[0xFF, 0xD8, 0x00]), None);
    }

    #[test]
    fn test_raf_preview() {
        let mut data = vec![0u8; 100];
        data[..16].copy_from_slice(RAF_MAGIC);
        data[84..88].copy_from_slice(&100u32.to_be_bytes());
        data[88..92].copy_from_slice(&(MINIMAL_JPEG.len() as u32).to_be_bytes());
        data.extend_from_slice(MINIMAL_JPEG);

        let previews = raf_previews(&data).unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].offset, 100);
        assert_eq!((previews[0].width, previews[0].height), (1, 1));
    }

    #[test]
    fn test_raf_requires_magic() {
        assert!(raf_previews(&[0u8; 120]).is_none());
    }
}
