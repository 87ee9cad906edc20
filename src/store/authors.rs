//! Author records and the author side of the Catalog Store contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub born: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub born: Option<i32>,
}

/// Author persistence contract. Lookups are by exact field equality;
/// `create` enforces the name constraints and uniqueness.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Get author by name
    async fn find_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, StoreError>;

    /// List all authors
    async fn list(&self) -> Result<Vec<AuthorRecord>, StoreError>;

    /// Count all authors
    async fn count(&self) -> Result<i64, StoreError>;

    /// Create a new author
    async fn create(&self, author: CreateAuthor) -> Result<AuthorRecord, StoreError>;

    /// Set the birth year of an existing author. Returns `None` when no
    /// author with that id exists anymore.
    async fn set_born(&self, id: &str, born: i32) -> Result<Option<AuthorRecord>, StoreError>;
}
