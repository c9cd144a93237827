//! Custom utilities.

pub mod archive;
pub mod error;
pub mod file_utils;

pub use archive::{ExtractedArchive, extract_zip};
pub use error::{Error, Result};
