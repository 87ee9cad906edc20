//! Book records and the book side of the Catalog Store contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;
use super::authors::AuthorRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub author_id: String,
}

/// A book with its author reference resolved. This is the shape queries
/// return and the payload the book-added event carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookWithAuthor {
    pub id: String,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub author: AuthorRecord,
}

/// New book referencing its author by name. Whether an unknown author is
/// created on the fly or rejected is the store's policy, not the caller's.
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub published: i32,
    pub genres: Vec<String>,
}

/// Filter predicates for book listings. All filtering happens inside the
/// store; callers never post-filter result sets.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Exact author name match.
    pub author: Option<String>,
    /// Membership test against the book's genre list.
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn by_author(name: &str) -> Self {
        Self {
            author: Some(name.to_string()),
            genre: None,
        }
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// List books matching the filter, author resolved
    async fn find(&self, filter: BookFilter) -> Result<Vec<BookWithAuthor>, StoreError>;

    /// Count books matching the filter
    async fn count(&self, filter: BookFilter) -> Result<i64, StoreError>;

    /// Create a new book, resolving (or creating) its author by name
    async fn create(&self, book: CreateBook) -> Result<BookWithAuthor, StoreError>;
}
