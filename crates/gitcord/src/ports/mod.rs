//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (repositories, services).
//!
//! Implementations of these traits live in the server crate.

pub mod delivery;
pub mod repositories;

// Re-exports
pub use delivery::*;
pub use repositories::*;
