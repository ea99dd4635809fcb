mod normalizer;
mod segmenter;
mod types;

pub use normalizer::normalize;
pub use segmenter::segment;
pub use types::{NormalizedTable, TableBlock};
