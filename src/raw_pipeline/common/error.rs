use thiserror::Error;

use crate::raw_pipeline::engine::{DataType, ErrorCode};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open RAW file: {0}")]
    Open(String),

    #[error("Engine failed to extract bitmap: {code}")]
    Extraction { code: ErrorCode },

    #[error("Unsupported bitmap encoding {data_type:?} ({width}x{height})")]
    UnsupportedEncoding {
        data_type: DataType,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractError {
    pub fn extraction(code: ErrorCode) -> Self {
        ExtractError::Extraction { code }
    }

    /// The engine code carried by an extraction failure.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ExtractError::Extraction { code } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
