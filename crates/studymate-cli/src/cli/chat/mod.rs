//! Interactive CLI chat with the active persona.
//!
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod loop_runner;
