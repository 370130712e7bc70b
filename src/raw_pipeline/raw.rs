//! RAW file handle and bitmap types
//!
//! This module provides the format-agnostic [`RawFile`] handle and the
//! bitmap values it hands out.

mod rawfile;
pub mod types;

pub use rawfile::RawFile;
pub use types::{Bitmap, RawData, Thumbnail};
