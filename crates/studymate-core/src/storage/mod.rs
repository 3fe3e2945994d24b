//! Storage abstractions for StudyMate.
//!
//! Implementations live in studymate-infra.

pub mod kv_store;
