//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod handler_repository;

pub use handler_repository::*;
