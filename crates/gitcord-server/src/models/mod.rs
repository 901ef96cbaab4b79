//! API DTOs
//!
//! Request/response shapes for the HTTP API. Responses follow the
//! `{error, status, ...}` envelope the dashboard clients expect.

mod error;
mod handler;

pub use error::*;
pub use handler::*;
