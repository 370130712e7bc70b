use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rawbits_rs::cli::RawCli;
use rawbits_rs::logger;
use rawbits_rs::raw_pipeline::RawDataExtractor;

fn main() -> Result<()> {
    let cli = RawCli::parse();
    logger::init(cli.args.verbose);

    let extractor = RawDataExtractor::new(cli.args.config());
    info!("Writing PGM files to {}", extractor.config().destination.display());

    for file in &cli.args.files {
        extractor
            .extract_file(file)
            .with_context(|| format!("Failed to extract raw data from {}", file.display()))?;
    }

    Ok(())
}
