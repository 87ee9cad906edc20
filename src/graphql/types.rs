//! GraphQL output types
//!
//! Thin views over store records. `Author` is a full `#[Object]` because its
//! `bookCount` field resolves against the store; the rest are plain shapes.

use async_graphql::{Context, Object, Result, ResultExt, SimpleObject};

use crate::error::CatalogError;
use crate::store::{AuthorRecord, BookFilter, BookWithAuthor, CatalogStore, UserRecord};

pub struct Author {
    pub id: String,
    pub name: String,
    pub born: Option<i32>,
}

#[Object]
impl Author {
    async fn id(&self) -> &str {
        &self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    /// Birth year, when known
    async fn born(&self) -> Option<i32> {
        self.born
    }

    /// Number of catalogued books by this author
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let count = store
            .books()
            .count(BookFilter::by_author(&self.name))
            .await
            .map_err(CatalogError::from)
            .extend()?;
        Ok(count as i32)
    }
}

impl From<AuthorRecord> for Author {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            born: record.born,
        }
    }
}

#[derive(SimpleObject)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Year of publication
    pub published: i32,
    pub genres: Vec<String>,
    pub author: Author,
}

impl From<BookWithAuthor> for Book {
    fn from(record: BookWithAuthor) -> Self {
        Self {
            id: record.id,
            title: record.title,
            published: record.published,
            genres: record.genres,
            author: record.author.into(),
        }
    }
}

#[derive(SimpleObject)]
pub struct User {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            favorite_genre: record.favorite_genre,
        }
    }
}

/// Bearer token envelope returned by `login`
#[derive(SimpleObject)]
pub struct Token {
    pub value: String,
}
