use std::path::Path;

use crate::raw_pipeline::engine::consts::{DecodeOptions, ErrorCode, RawFileType};
use crate::raw_pipeline::raw::types::{Bitmap, RawData};

/// A decoding engine able to open RAW containers.
///
/// Opening returns `None` when the input cannot be read or recognized; the
/// caller turns that into its own error.
pub trait RawEngine {
    fn open_path(&self, path: &Path, hint: RawFileType) -> Option<Box<dyn RawSession>>;

    fn open_memory(&self, data: &[u8], hint: RawFileType) -> Option<Box<dyn RawSession>>;
}

/// One opened RAW container.
pub trait RawSession {
    fn format_tag(&self) -> RawFileType;

    /// TIFF orientation code, 0 when the file has none.
    fn orientation(&self) -> i32;

    /// Widths of the embedded previews, in container order.
    fn thumbnail_widths(&self) -> Vec<u32>;

    /// Copies out the preview that best matches `requested_width`.
    fn extract_thumbnail(&self, requested_width: u32) -> Result<Bitmap, ErrorCode>;

    /// Decodes the full sensor plane.
    fn extract_raw_data(&self, options: DecodeOptions) -> Result<RawData, ErrorCode>;
}
