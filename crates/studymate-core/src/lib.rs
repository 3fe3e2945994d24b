//! Business logic and port trait definitions for StudyMate.
//!
//! This crate defines the "ports" (`LlmProvider`, `KvStore`, `ImportSource`)
//! that the infrastructure layer implements. It depends only on
//! `studymate-types` -- never on `studymate-infra` or any database/IO crate.

pub mod chat;
pub mod document;
pub mod emotion;
pub mod import;
pub mod llm;
pub mod notify;
pub mod service;
pub mod storage;
pub mod study;

#[cfg(test)]
mod testing;
