use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::raw_pipeline::common::error::Result;
use crate::raw_pipeline::conversions::viewer::ViewerLauncher;

/// Basename without its last extension.
pub(crate) fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Absolute path of `name` inside `destination`.
pub(crate) fn output_path(destination: &Path, name: &str) -> Result<PathBuf> {
    Ok(std::path::absolute(destination.join(name))?)
}

/// Creates `path` and hands the writer a buffered handle to it.
pub(crate) fn write_file<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut output = BufWriter::new(File::create(path)?);
    encode(&mut output)?;
    output.flush()?;
    Ok(())
}

/// Viewer failures are reported and otherwise ignored.
pub(crate) fn show<V: ViewerLauncher>(viewer: &V, path: &Path) {
    if let Err(e) = viewer.open(path) {
        warn!("Could not open {} in a viewer: {}", path.display(), e);
    }
}
