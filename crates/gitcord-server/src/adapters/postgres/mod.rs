//! PostgreSQL Adapters

mod handler_repository;

pub use handler_repository::PgHandlerRepository;
