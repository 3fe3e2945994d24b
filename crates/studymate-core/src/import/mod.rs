//! Cancelable import of study material.

pub mod controller;
pub mod source;

pub use controller::{ImportController, ImportEvents, ImportHandle};
pub use source::{ImportSource, MemorySource};
