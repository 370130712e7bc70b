use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rawbits_rs::cli::ThumbnailCli;
use rawbits_rs::logger;
use rawbits_rs::raw_pipeline::ThumbnailExtractor;

fn main() -> Result<()> {
    let cli = ThumbnailCli::parse();
    logger::init(cli.args.verbose);

    let extractor = ThumbnailExtractor::new(cli.args.config());

    let mut written = 0;
    let mut skipped = 0;
    for file in &cli.args.files {
        let report = extractor
            .extract_file(file)
            .with_context(|| format!("Failed to extract thumbnails from {}", file.display()))?;
        written += report.written().len();
        skipped += report.skipped().len();
    }

    info!(written, skipped, "Thumbnail extraction complete");
    Ok(())
}
