//! Schema wiring for the catalog API

use std::sync::Arc;

use async_graphql::{MergedObject, Schema};

use crate::services::{CredentialVerifier, EventBus, TokenService};
use crate::store::{BookWithAuthor, CatalogStore};

use super::mutations::{AuthorMutations, BookMutations, UserMutations};
use super::queries::{AuthorQueries, BookQueries, SystemQueries, UserQueries};
use super::subscriptions::SubscriptionRoot;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries, AuthorQueries, UserQueries, SystemQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(BookMutations, AuthorMutations, UserMutations);

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with its collaborators injected as context data.
/// Nothing a resolver reaches for is ambient; tests wire their own
/// isolated instances.
pub fn build_schema(
    store: CatalogStore,
    tokens: TokenService,
    bus: EventBus<BookWithAuthor>,
    credentials: Arc<dyn CredentialVerifier>,
) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(store)
    .data(tokens)
    .data(bus)
    .data(credentials)
    .finish()
}
