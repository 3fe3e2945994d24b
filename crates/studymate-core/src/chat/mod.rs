//! Companion chat: bounded memory, prompt assembly, the response pipeline
//! and the session object that ties them to the active persona.

pub mod engine;
pub mod memory;
pub mod prompt;
pub mod session;
