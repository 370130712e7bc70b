//! Container encoding module
//!
//! Serializes bitmaps as PGM/PPM, or passes already-compressed encodings
//! through under their canonical extension.

pub mod mime;
mod pnm_writer;
pub mod types;
mod writer;

pub use pnm_writer::StandardContainerWriter;
pub use types::{ContainerFormat, PnmVersion};
pub use writer::ContainerWriter;
