//! Shared domain types for StudyMate.
//!
//! This crate contains the domain types used across the workspace:
//! Persona, EmotionLabel, Document, conversation turns, import progress,
//! chat-completion shapes and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod document;
pub mod emotion;
pub mod error;
pub mod import;
pub mod llm;
pub mod notification;
pub mod persona;
pub mod study;
