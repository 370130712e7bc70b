//! Process-wide MIME lookup for already-compressed bitmap encodings.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::raw_pipeline::engine::DataType;

static MIME_TYPES: LazyLock<HashMap<DataType, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (DataType::Jpeg, "image/jpeg"),
        (DataType::Tiff, "image/tiff"),
        (DataType::Png, "image/png"),
    ])
});

static EXTENSIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("image/jpeg", ".jpg"),
        ("image/tiff", ".tif"),
        ("image/png", ".png"),
    ])
});

pub fn mime_type(data_type: DataType) -> Option<&'static str> {
    MIME_TYPES.get(&data_type).copied()
}

/// Canonical file extension for a MIME type, dot included.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    EXTENSIONS.get(mime).copied()
}
