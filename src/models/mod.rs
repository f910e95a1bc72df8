//! Data models for doccorpus.

mod file_type;
mod record;

pub use file_type::FileType;
pub use record::{Extraction, ExtractionUnit, Location, Record};
