//! Output container kinds

use std::fmt::{self, Display, Formatter};

/// Portable anymap flavours written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmVersion {
    /// Grayscale, one or two bytes per sample
    P5,
    /// Packed 8-bit RGB
    P6,
}

impl Display for PnmVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::P5 => write!(f, "P5"),
            Self::P6 => write!(f, "P6"),
        }
    }
}

/// How a bitmap ends up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// PGM header followed by the sensor samples
    Pgm,
    /// PPM header followed by the RGB triplets
    Ppm,
    /// Already a complete image file, written unchanged
    PassThrough {
        mime: &'static str,
        extension: &'static str,
    },
}

impl ContainerFormat {
    /// File name suffix, dot included.
    pub fn suffix(&self) -> &'static str {
        match self {
            ContainerFormat::Pgm => ".pgm",
            ContainerFormat::Ppm => ".ppm",
            ContainerFormat::PassThrough { extension, .. } => *extension,
        }
    }
}
