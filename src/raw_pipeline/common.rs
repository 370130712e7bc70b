//! Common utilities module
//!
//! Error types shared by the engine, the container encoder and the drivers.

pub mod error;

pub use error::{ExtractError, Result};
