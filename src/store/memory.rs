//! In-process Catalog Store
//!
//! Keeps all records in vectors behind one `RwLock`, preserving insertion
//! order for listings. Enforces the catalog's field constraints (required,
//! minimum length, uniqueness) so constraint violations surface as
//! `StoreError::Validation` exactly like a real backend would raise them.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::StoreError;
use super::authors::{AuthorRecord, AuthorStore, CreateAuthor};
use super::books::{BookFilter, BookRecord, BookStore, BookWithAuthor, CreateBook};
use super::users::{CreateUser, UserRecord, UserStore};

const MIN_AUTHOR_NAME_LEN: usize = 4;
const MIN_BOOK_TITLE_LEN: usize = 2;
const MIN_USERNAME_LEN: usize = 3;

#[derive(Default)]
struct MemoryState {
    authors: Vec<AuthorRecord>,
    books: Vec<BookRecord>,
    users: Vec<UserRecord>,
}

pub struct MemoryStore {
    /// Unknown-author policy for book inserts: create on the fly when true,
    /// reject with a validation error when false.
    auto_create_authors: bool,
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Self::with_author_policy(true)
    }

    pub fn with_author_policy(auto_create_authors: bool) -> Arc<Self> {
        Arc::new(Self {
            auto_create_authors,
            state: RwLock::new(MemoryState::default()),
        })
    }
}

fn require_min_len(field: &'static str, value: &str, min: usize) -> Result<(), StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(field, value, "is required"));
    }
    if trimmed.chars().count() < min {
        return Err(StoreError::validation(
            field,
            value,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}

fn insert_author(state: &mut MemoryState, author: CreateAuthor) -> Result<AuthorRecord, StoreError> {
    require_min_len("name", &author.name, MIN_AUTHOR_NAME_LEN)?;
    if state.authors.iter().any(|a| a.name == author.name) {
        return Err(StoreError::validation("name", &author.name, "already exists"));
    }
    let record = AuthorRecord {
        id: Uuid::new_v4().to_string(),
        name: author.name,
        born: author.born,
    };
    state.authors.push(record.clone());
    Ok(record)
}

fn populate(state: &MemoryState, book: &BookRecord) -> Result<BookWithAuthor, StoreError> {
    let author = state
        .authors
        .iter()
        .find(|a| a.id == book.author_id)
        .ok_or_else(|| {
            StoreError::Backend(format!(
                "author {} missing for book {}",
                book.author_id, book.id
            ))
        })?;
    Ok(BookWithAuthor {
        id: book.id.clone(),
        title: book.title.clone(),
        published: book.published,
        genres: book.genres.clone(),
        author: author.clone(),
    })
}

fn filtered(state: &MemoryState, filter: &BookFilter) -> Result<Vec<BookWithAuthor>, StoreError> {
    let mut out = Vec::new();
    for book in &state.books {
        if let Some(genre) = &filter.genre {
            if !book.genres.iter().any(|g| g == genre) {
                continue;
            }
        }
        let populated = populate(state, book)?;
        if let Some(author) = &filter.author {
            if &populated.author.name != author {
                continue;
            }
        }
        out.push(populated);
    }
    Ok(out)
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, StoreError> {
        let state = self.state.read();
        Ok(state.authors.iter().find(|a| a.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<AuthorRecord>, StoreError> {
        Ok(self.state.read().authors.clone())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.state.read().authors.len() as i64)
    }

    async fn create(&self, author: CreateAuthor) -> Result<AuthorRecord, StoreError> {
        let mut state = self.state.write();
        insert_author(&mut state, author)
    }

    async fn set_born(&self, id: &str, born: i32) -> Result<Option<AuthorRecord>, StoreError> {
        let mut state = self.state.write();
        Ok(state.authors.iter_mut().find(|a| a.id == id).map(|a| {
            a.born = Some(born);
            a.clone()
        }))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find(&self, filter: BookFilter) -> Result<Vec<BookWithAuthor>, StoreError> {
        let state = self.state.read();
        filtered(&state, &filter)
    }

    async fn count(&self, filter: BookFilter) -> Result<i64, StoreError> {
        let state = self.state.read();
        Ok(filtered(&state, &filter)?.len() as i64)
    }

    async fn create(&self, book: CreateBook) -> Result<BookWithAuthor, StoreError> {
        let mut state = self.state.write();

        require_min_len("title", &book.title, MIN_BOOK_TITLE_LEN)?;
        if state.books.iter().any(|b| b.title == book.title) {
            return Err(StoreError::validation("title", &book.title, "already exists"));
        }

        let author = match state.authors.iter().find(|a| a.name == book.author) {
            Some(existing) => existing.clone(),
            None if self.auto_create_authors => insert_author(
                &mut state,
                CreateAuthor {
                    name: book.author.clone(),
                    born: None,
                },
            )?,
            None => {
                return Err(StoreError::validation("author", &book.author, "does not exist"));
            }
        };

        let record = BookRecord {
            id: Uuid::new_v4().to_string(),
            title: book.title,
            published: book.published,
            genres: book.genres,
            author_id: author.id.clone(),
        };
        state.books.push(record.clone());

        Ok(BookWithAuthor {
            id: record.id,
            title: record.title,
            published: record.published,
            genres: record.genres,
            author,
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let state = self.state.read();
        Ok(state.users.iter().any(|u| u.username == username))
    }

    async fn create(&self, user: CreateUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write();

        require_min_len("username", &user.username, MIN_USERNAME_LEN)?;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::validation(
                "username",
                &user.username,
                "already exists",
            ));
        }
        if user.favorite_genre.trim().is_empty() {
            return Err(StoreError::validation(
                "favoriteGenre",
                &user.favorite_genre,
                "is required",
            ));
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            username: user.username,
            favorite_genre: user.favorite_genre,
        };
        state.users.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use crate::store::{
        BookFilter, CatalogStore, CreateAuthor, CreateBook, CreateUser, StoreError,
    };

    fn sample_book(title: &str, author: &str, genres: &[&str]) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            published: 1965,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn creates_and_lists_authors_in_insertion_order() {
        let store = CatalogStore::in_memory();
        store
            .authors()
            .create(CreateAuthor {
                name: "Frank Herbert".into(),
                born: Some(1920),
            })
            .await
            .unwrap();
        store
            .authors()
            .create(CreateAuthor {
                name: "Ursula K. Le Guin".into(),
                born: Some(1929),
            })
            .await
            .unwrap();

        let authors = store.authors().list().await.unwrap();
        let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Frank Herbert", "Ursula K. Le Guin"]);
        assert_eq!(store.authors().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn rejects_author_names_below_minimum_length() {
        let store = CatalogStore::in_memory();
        let err = store
            .authors()
            .create(CreateAuthor {
                name: "Poe".into(),
                born: None,
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "name", .. });
    }

    #[tokio::test]
    async fn rejects_duplicate_author_names() {
        let store = CatalogStore::in_memory();
        store
            .authors()
            .create(CreateAuthor {
                name: "Frank Herbert".into(),
                born: None,
            })
            .await
            .unwrap();
        let err = store
            .authors()
            .create(CreateAuthor {
                name: "Frank Herbert".into(),
                born: Some(1920),
            })
            .await
            .unwrap_err();
        assert_matches!(
            err,
            StoreError::Validation { field: "name", ref value, .. } if value.as_str() == "Frank Herbert"
        );
    }

    #[tokio::test]
    async fn book_insert_creates_unknown_author_by_default() {
        let store = CatalogStore::in_memory();
        let book = store
            .books()
            .create(sample_book("Dune", "Frank Herbert", &["scifi"]))
            .await
            .unwrap();

        assert_eq!(book.author.name, "Frank Herbert");
        assert_eq!(book.author.born, None);
        assert_eq!(store.authors().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn strict_policy_rejects_unknown_author() {
        let store = CatalogStore::in_memory_with_author_policy(false);
        let err = store
            .books()
            .create(sample_book("Dune", "Frank Herbert", &["scifi"]))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "author", .. });
        assert_eq!(store.books().count(BookFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_book_insert_leaves_no_partial_author() {
        // Auto-created author names go through the same constraints; the
        // book must not land when its author is rejected.
        let store = CatalogStore::in_memory();
        let err = store
            .books()
            .create(sample_book("Dune", "Poe", &["scifi"]))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "name", .. });
        assert_eq!(store.books().count(BookFilter::default()).await.unwrap(), 0);
        assert_eq!(store.authors().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_duplicate_book_titles() {
        let store = CatalogStore::in_memory();
        store
            .books()
            .create(sample_book("Dune", "Frank Herbert", &["scifi"]))
            .await
            .unwrap();
        let err = store
            .books()
            .create(sample_book("Dune", "Someone Else", &[]))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "title", .. });
    }

    #[tokio::test]
    async fn filters_by_author_and_genre_membership() {
        let store = CatalogStore::in_memory();
        store
            .books()
            .create(sample_book("Dune", "Frank Herbert", &["scifi", "classic"]))
            .await
            .unwrap();
        store
            .books()
            .create(sample_book("Dune Messiah", "Frank Herbert", &["scifi"]))
            .await
            .unwrap();
        store
            .books()
            .create(sample_book("The Dispossessed", "Ursula K. Le Guin", &["scifi", "utopia"]))
            .await
            .unwrap();

        let by_author = store
            .books()
            .find(BookFilter::by_author("Frank Herbert"))
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        let by_genre = store
            .books()
            .find(BookFilter {
                author: None,
                genre: Some("classic".into()),
            })
            .await
            .unwrap();
        assert_eq!(by_genre.len(), 1);
        assert_eq!(by_genre[0].title, "Dune");

        let both = store
            .books()
            .find(BookFilter {
                author: Some("Ursula K. Le Guin".into()),
                genre: Some("utopia".into()),
            })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "The Dispossessed");

        assert_eq!(
            store
                .books()
                .count(BookFilter::by_author("Frank Herbert"))
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn set_born_on_missing_author_returns_none() {
        let store = CatalogStore::in_memory();
        let updated = store.authors().set_born("no-such-id", 1920).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn set_born_updates_existing_author() {
        let store = CatalogStore::in_memory();
        let author = store
            .authors()
            .create(CreateAuthor {
                name: "Frank Herbert".into(),
                born: None,
            })
            .await
            .unwrap();
        let updated = store
            .authors()
            .set_born(&author.id, 1920)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.born, Some(1920));

        let found = store
            .authors()
            .find_by_name("Frank Herbert")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.born, Some(1920));
    }

    #[tokio::test]
    async fn enforces_user_constraints() {
        let store = CatalogStore::in_memory();

        let err = store
            .users()
            .create(CreateUser {
                username: "al".into(),
                favorite_genre: "scifi".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "username", .. });

        let err = store
            .users()
            .create(CreateUser {
                username: "ada".into(),
                favorite_genre: "  ".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "favoriteGenre", .. });

        store
            .users()
            .create(CreateUser {
                username: "ada".into(),
                favorite_genre: "scifi".into(),
            })
            .await
            .unwrap();
        let err = store
            .users()
            .create(CreateUser {
                username: "ada".into(),
                favorite_genre: "fantasy".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Validation { field: "username", .. });

        assert!(store.users().exists_by_username("ada").await.unwrap());
        assert!(!store.users().exists_by_username("grace").await.unwrap());
    }
}
