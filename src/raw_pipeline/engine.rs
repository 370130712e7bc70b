//! Decoding engine boundary
//!
//! The facade only talks to the engine through [`RawEngine`] and
//! [`RawSession`]. [`RawLoaderEngine`] is the implementation shipped with the
//! crate.

mod backend;
mod consts;
pub(crate) mod container_walk;
mod identify;
mod rawloader_engine;
mod selector;

pub use backend::{RawEngine, RawSession};
pub use consts::{DataType, DecodeOptions, ErrorCode, RawFileType};
pub use identify::{identify_content, identify_extension};
pub use rawloader_engine::RawLoaderEngine;
pub use selector::select_thumbnail;
