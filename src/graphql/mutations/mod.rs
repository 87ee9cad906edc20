pub mod authors;
pub mod books;
pub mod users;

pub use authors::AuthorMutations;
pub use books::BookMutations;
pub use users::UserMutations;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result, ResultExt};

    pub(crate) use crate::error::CatalogError;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::subscriptions::BOOK_ADDED_TOPIC;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{CredentialVerifier, EventBus, TokenService};
    pub(crate) use crate::store::{BookWithAuthor, CatalogStore, CreateBook, CreateUser};
}
