//! Domain Entities
//!
//! - Handler: per-token relay configuration (Discord URL + templates)
//! - Canonical events: kind-tagged records projected from raw GitLab payloads

mod event;
mod handler;

pub use event::*;
pub use handler::*;
