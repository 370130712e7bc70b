use std::path::PathBuf;

use clap::{Args, Parser, builder::ValueHint};

use crate::raw_pipeline::ExtractionConfig;

/// Options shared by both extraction commands.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Open each written file in the system image viewer
    #[arg(long, short = 'b')]
    pub browser: bool,

    /// Directory the output files are written to
    #[arg(
        long,
        short = 'd',
        value_name = "DESTDIR",
        value_hint = ValueHint::DirPath,
        default_value = "."
    )]
    pub destination: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Camera RAW files to process
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath, required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl ExtractArgs {
    pub fn config(&self) -> ExtractionConfig {
        ExtractionConfig::builder()
            .destination(self.destination.clone())
            .open_in_viewer(self.browser)
            .build()
    }
}

/// Command-line arguments for extract-raw.
#[derive(Parser, Debug)]
#[command(
    name = "extract-raw",
    about = "Export the sensor data of camera RAW files as PGM images.",
    version
)]
pub struct RawCli {
    #[command(flatten)]
    pub args: ExtractArgs,
}

/// Command-line arguments for extract-thumbnails.
#[derive(Parser, Debug)]
#[command(
    name = "extract-thumbnails",
    about = "Export the embedded previews of camera RAW files.",
    version
)]
pub struct ThumbnailCli {
    #[command(flatten)]
    pub args: ExtractArgs,
}
