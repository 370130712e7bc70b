//! Engine-level enumerations: file types, bitmap encodings, error codes
//! and decode options.
//!
//! Discriminants follow the numbering used by libopenraw so codes printed in
//! diagnostics line up with that library's documentation.

use std::fmt;

use bitflags::bitflags;

/// Camera RAW container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum RawFileType {
    /// Not identified yet. As a hint, asks the engine to guess.
    #[default]
    Unknown = 0,
    /// Canon CR2
    Cr2 = 1,
    /// Canon CRW
    Crw = 2,
    /// Nikon NEF
    Nef = 3,
    /// Minolta MRW
    Mrw = 4,
    /// Sony ARW
    Arw = 5,
    /// Adobe DNG
    Dng = 6,
    /// Olympus ORF
    Orf = 7,
    /// Pentax PEF
    Pef = 8,
    /// Epson ERF
    Erf = 9,
    /// Generic TIFF
    Tiff = 10,
    /// Nikon NRW
    Nrw = 11,
    /// Panasonic RAW, RW2 and RWL
    Rw2 = 12,
    /// Fujifilm RAF
    Raf = 13,
    /// Canon CR3
    Cr3 = 14,
    /// GoPro GPR
    Gpr = 15,
    /// Sony SR2
    Sr2 = 16,
}

impl RawFileType {
    /// Whether the container is laid out as TIFF IFDs.
    pub fn is_tiff_based(self) -> bool {
        matches!(
            self,
            RawFileType::Cr2
                | RawFileType::Nef
                | RawFileType::Nrw
                | RawFileType::Arw
                | RawFileType::Sr2
                | RawFileType::Dng
                | RawFileType::Gpr
                | RawFileType::Orf
                | RawFileType::Pef
                | RawFileType::Erf
                | RawFileType::Tiff
                | RawFileType::Rw2
        )
    }
}

/// Pixel encoding of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum DataType {
    #[default]
    None = 0,
    /// 8 bits per channel, interleaved RGB
    Pixmap8Rgb = 1,
    /// 16 bits per channel, interleaved RGB
    Pixmap16Rgb = 2,
    Jpeg = 3,
    Tiff = 4,
    Png = 5,
    /// Uncompressed sensor samples
    Raw = 6,
    /// Sensor samples still in their camera-specific compression
    CompressedRaw = 7,
    Unknown = 100,
}

impl DataType {
    /// Encodings that are complete image files on their own.
    pub fn is_compressed_container(self) -> bool {
        matches!(self, DataType::Jpeg | DataType::Tiff | DataType::Png)
    }
}

/// Error codes reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    None = 0,
    BufTooSmall = 1,
    NotARef = 2,
    CantOpen = 3,
    ClosedStream = 4,
    NotFound = 5,
    InvalidParam = 6,
    InvalidFormat = 7,
    Decompression = 8,
    NotImplemented = 9,
    AlreadyOpen = 10,
    Unknown = 42,
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == ErrorCode::None
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    fn description(self) -> &'static str {
        match self {
            ErrorCode::None => "no error",
            ErrorCode::BufTooSmall => "buffer too small",
            ErrorCode::NotARef => "object is not a reference",
            ErrorCode::CantOpen => "cannot open",
            ErrorCode::ClosedStream => "stream closed",
            ErrorCode::NotFound => "not found",
            ErrorCode::InvalidParam => "invalid parameter",
            ErrorCode::InvalidFormat => "invalid format",
            ErrorCode::Decompression => "decompression error",
            ErrorCode::NotImplemented => "not implemented",
            ErrorCode::AlreadyOpen => "stream already open",
            ErrorCode::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

bitflags! {
    /// Options controlling how sensor data is decoded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DecodeOptions: u32 {
        /// Hand back sensor data in its on-disk compression
        const DONT_DECOMPRESS = 0x0000_0001;
    }
}

impl DecodeOptions {
    pub const NONE: DecodeOptions = DecodeOptions::empty();
}
