//! Catalog Store: the persistence collaborator for authors, books and users
//!
//! The store is a boundary, not a database layer. Resolvers talk to the
//! trait contracts in `authors`/`books`/`users` through the [`CatalogStore`]
//! handle and never filter result sets themselves; every predicate is pushed
//! into the store. The crate ships one implementation, the in-process
//! [`memory::MemoryStore`].

pub mod authors;
pub mod books;
pub mod memory;
pub mod users;

use std::sync::Arc;

pub use authors::{AuthorRecord, AuthorStore, CreateAuthor};
pub use books::{BookFilter, BookRecord, BookStore, BookWithAuthor, CreateBook};
pub use memory::MemoryStore;
pub use users::{CreateUser, UserRecord, UserStore};

/// Errors a store implementation may surface. Constraint violations carry
/// the offending field and value so callers can attach them to responses.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("{field} {reason} (got {value:?})")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Cloneable handle bundling the three store contracts. Built once at
/// startup and injected wherever persistence is needed; tests build their
/// own isolated instance per case.
#[derive(Clone)]
pub struct CatalogStore {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
    users: Arc<dyn UserStore>,
}

impl CatalogStore {
    pub fn new(
        authors: Arc<dyn AuthorStore>,
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            authors,
            books,
            users,
        }
    }

    /// In-memory store with the default policy of creating unknown authors
    /// on book insert.
    pub fn in_memory() -> Self {
        Self::backed_by(MemoryStore::new())
    }

    /// In-memory store with an explicit unknown-author policy.
    pub fn in_memory_with_author_policy(auto_create_authors: bool) -> Self {
        Self::backed_by(MemoryStore::with_author_policy(auto_create_authors))
    }

    fn backed_by(store: Arc<MemoryStore>) -> Self {
        Self {
            authors: store.clone(),
            books: store.clone(),
            users: store,
        }
    }

    pub fn authors(&self) -> &dyn AuthorStore {
        self.authors.as_ref()
    }

    pub fn books(&self) -> &dyn BookStore {
        self.books.as_ref()
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
}
