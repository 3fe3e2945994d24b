//! Emotion resolution: keyword heuristics and trailing reply tags.

pub mod classifier;
pub mod tag;

pub use classifier::classify;
pub use tag::{map_tag, split_trailing_tag};
