/// Unicode to ASCII name normalization
pub mod normalize;

/// Per-category name file reader
pub mod reader;

/// In-memory dataset of read instances
pub mod dataset;

pub use dataset::{Dataset, DATASET};
pub use normalize::unicode_to_ascii;
pub use reader::{read_lines, Instances, Reader, ReaderConfig, ReaderError, READER};
