pub mod cli;
pub mod logger;
pub mod raw_pipeline;
