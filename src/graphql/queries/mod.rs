pub mod authors;
pub mod books;
pub mod system;
pub mod users;

pub use authors::AuthorQueries;
pub use books::BookQueries;
pub use system::SystemQueries;
pub use users::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result, ResultExt};

    pub(crate) use crate::error::CatalogError;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::store::{BookFilter, CatalogStore};
}
