//! Gitcord Domain Library
//!
//! Core types and logic for relaying GitLab webhook events to Discord.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Handler, canonical event records)
//!   - `value_objects/`: Immutable value types (EventKind, TemplatePath)
//!   - `errors/`: Domain-specific error types
//!
//! - **Core transformations**:
//!   - `normalize`: projects raw GitLab webhook payloads into canonical,
//!     kind-tagged event records
//!   - `template`: resolves `{{...}}` placeholders in user-authored message
//!     templates against a canonical event
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Handler configuration store
//!   - `delivery`: Outbound message delivery
//!
//! Both core transformations are pure and synchronous: no I/O, no shared
//! state, one canonical record (or rendered string) per call.

pub mod domain;
pub mod normalize;
pub mod ports;
pub mod template;

// Re-export commonly used types
pub use domain::{
    CanonicalEvent, DomainError, EventKind, Handler, TemplatePath, UnrecognizedEvent,
};
pub use normalize::normalize;
pub use ports::{DeliveryOutcome, HandlerRepository, MessageDelivery};
pub use template::{lookup, render, TemplateSet};
