//! Business logic services (use cases).
//!
//! Services orchestrate storage calls and business rules. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod roster;
pub mod settings;
