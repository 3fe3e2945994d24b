//! Turning raw study material into structured documents.

pub mod markdown;
pub mod segmenter;

pub use markdown::render_markdown;
pub use segmenter::segment;
