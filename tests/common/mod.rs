#![allow(dead_code)]

/// 1x1 baseline JPEG.
pub const MINIMAL_JPEG: &[u8] = &[
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

pub const RGB_WIDTH: u32 = 4;
pub const RGB_HEIGHT: u32 = 3;

const SHORT: u16 = 3;
const LONG: u16 = 4;
const ASCII: u16 = 2;

fn entry(out: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&field_type.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}

/// The 4x3 RGB pixels stored in IFD0 of [`synthetic_raw`].
pub fn rgb_pixels() -> Vec<u8> {
    (0..RGB_WIDTH * RGB_HEIGHT * 3).map(|i| (i * 7) as u8).collect()
}

/// Little-endian TIFF shaped like a camera file: IFD0 holds a 4x3 RGB
/// preview, orientation 6 and `make` (five bytes or more); IFD1 holds a
/// 1x1 JPEG thumbnail.
pub fn synthetic_raw(make: &str) -> Vec<u8> {
    let mut make_bytes = make.as_bytes().to_vec();
    make_bytes.push(0);
    assert!(make_bytes.len() > 4, "make must be stored out of line");

    let rgb = rgb_pixels();
    let ifd0 = 8u32;
    let ifd1 = ifd0 + 2 + 10 * 12 + 4;
    let make_at = ifd1 + 2 + 3 * 12 + 4;
    let bps_at = make_at + make_bytes.len() as u32;
    let rgb_at = bps_at + 6;
    let jpeg_at = rgb_at + rgb.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"II*\0");
    out.extend_from_slice(&ifd0.to_le_bytes());

    out.extend_from_slice(&10u16.to_le_bytes());
    entry(&mut out, 0x0100, SHORT, 1, RGB_WIDTH);
    entry(&mut out, 0x0101, SHORT, 1, RGB_HEIGHT);
    entry(&mut out, 0x0102, SHORT, 3, bps_at);
    entry(&mut out, 0x0103, SHORT, 1, 1);
    entry(&mut out, 0x0106, SHORT, 1, 2);
    entry(&mut out, 0x010F, ASCII, make_bytes.len() as u32, make_at);
    entry(&mut out, 0x0111, LONG, 1, rgb_at);
    entry(&mut out, 0x0112, SHORT, 1, 6);
    entry(&mut out, 0x0115, SHORT, 1, 3);
    entry(&mut out, 0x0117, LONG, 1, rgb.len() as u32);
    out.extend_from_slice(&ifd1.to_le_bytes());

    out.extend_from_slice(&3u16.to_le_bytes());
    entry(&mut out, 0x0103, SHORT, 1, 6);
    entry(&mut out, 0x0201, LONG, 1, jpeg_at);
    entry(&mut out, 0x0202, LONG, 1, MINIMAL_JPEG.len() as u32);
    out.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(out.len() as u32, make_at);
    out.extend_from_slice(&make_bytes);
    for _ in 0..3 {
        out.extend_from_slice(&8u16.to_le_bytes());
    }
    out.extend_from_slice(&rgb);
    out.extend_from_slice(MINIMAL_JPEG);
    out
}
