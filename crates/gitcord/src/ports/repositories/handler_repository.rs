//! Handler Repository Port
//!
//! Abstract interface for handler configuration persistence. The store is
//! a key-value get/put/delete keyed by the handler token; concurrent edits
//! to the same handler are last-write-wins.

use async_trait::async_trait;

use crate::domain::entities::Handler;
use crate::domain::errors::DomainError;

/// Repository interface for handler configuration
#[async_trait]
pub trait HandlerRepository: Send + Sync {
    /// Find a handler by its token
    async fn find(&self, token: &str) -> Result<Option<Handler>, DomainError>;

    /// Save a handler (insert or update, keyed by token)
    async fn save(&self, handler: &Handler) -> Result<(), DomainError>;

    /// Delete a handler by token, returning whether it existed
    async fn delete(&self, token: &str) -> Result<bool, DomainError>;
}
