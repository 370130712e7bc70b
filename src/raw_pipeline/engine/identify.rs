//! Format identification from file extensions and header bytes.

use std::path::Path;

use tracing::debug;

use crate::raw_pipeline::engine::consts::RawFileType;
use crate::raw_pipeline::engine::container_walk::{
    RAF_MAGIC, TAG_DNG_VERSION, TAG_MAKE, TiffContainer,
};

/// Longest extension the table knows about.
const MAX_EXTENSION_LEN: usize = 3;

/// Headers this short never identify anything.
const MIN_CONTENT_LEN: usize = 5;

const EXTENSIONS: &[(&str, RawFileType)] = &[
    ("cr2", RawFileType::Cr2),
    ("nef", RawFileType::Nef),
    ("nrw", RawFileType::Nrw),
    ("arw", RawFileType::Arw),
    ("sr2", RawFileType::Sr2),
    ("orf", RawFileType::Orf),
    ("dng", RawFileType::Dng),
    ("gpr", RawFileType::Gpr),
    ("pef", RawFileType::Pef),
    ("crw", RawFileType::Crw),
    ("erf", RawFileType::Erf),
    ("mrw", RawFileType::Mrw),
    ("raw", RawFileType::Rw2),
    ("rw2", RawFileType::Rw2),
    ("rwl", RawFileType::Rw2),
    ("raf", RawFileType::Raf),
    ("cr3", RawFileType::Cr3),
];

/// Looks the extension up, case-insensitively.
pub fn identify_extension(path: &Path) -> RawFileType {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return RawFileType::Unknown;
    };
    if ext.len() > MAX_EXTENSION_LEN {
        return RawFileType::Unknown;
    }
    let ext = ext.to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, file_type)| *file_type)
        .unwrap_or(RawFileType::Unknown)
}

/// Guesses the format from the header bytes.
pub fn identify_content(data: &[u8]) -> RawFileType {
    if data.len() < MIN_CONTENT_LEN {
        return RawFileType::Unknown;
    }

    let file_type = if data.starts_with(b"\0MRM") {
        RawFileType::Mrw
    } else if data.get(4..12) == Some(b"ftypcrx ".as_slice()) {
        RawFileType::Cr3
    } else if data.starts_with(b"II\x1a\0\0\0HEAPCCDR") {
        RawFileType::Crw
    } else if data.starts_with(b"IIRO") {
        RawFileType::Orf
    } else if data.starts_with(b"IIU\0") {
        RawFileType::Rw2
    } else if data.starts_with(RAF_MAGIC) {
        RawFileType::Raf
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        identify_tiff(data)
    } else {
        RawFileType::Unknown
    };

    debug!("Content identified as {:?}", file_type);
    file_type
}

fn identify_tiff(data: &[u8]) -> RawFileType {
    if data.get(8..11) == Some(b"CR\x02".as_slice()) {
        return RawFileType::Cr2;
    }

    let Some(container) = TiffContainer::parse(data) else {
        return RawFileType::Unknown;
    };
    let Some(ifd0) = container.ifd0() else {
        return RawFileType::Unknown;
    };

    if ifd0.entry(TAG_DNG_VERSION).is_some() {
        return RawFileType::Dng;
    }

    match container.ascii(&ifd0, TAG_MAKE) {
        Some(make) if make.starts_with("NIKON") => RawFileType::Nef,
        Some(make) if make == "SEIKO EPSON CORP." => RawFileType::Erf,
        Some(make) if make.starts_with("PENTAX") => RawFileType::Pef,
        Some(make) if make.starts_with("SONY") => RawFileType::Arw,
        Some(make) if make == "Canon" => RawFileType::Cr2,
        _ => RawFileType::Unknown,
    }
}
