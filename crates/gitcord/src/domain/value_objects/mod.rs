//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod event_kind;
mod template_path;

pub use event_kind::*;
pub use template_path::*;
