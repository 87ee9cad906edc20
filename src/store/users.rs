//! User account records and the user side of the Catalog Store contract
//!
//! Accounts carry no credential material; credential checks are a separate
//! concern (see `services::credentials`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub favorite_genre: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Get user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Check whether a username is already taken
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> Result<UserRecord, StoreError>;
}
