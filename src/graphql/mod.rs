//! GraphQL surface of the catalog
//!
//! One resolver struct per domain area, merged into the query and mutation
//! roots in `schema`. `auth` carries the per-request user context, `types`
//! the output shapes, `subscriptions` the streaming root.

pub mod auth;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod subscriptions;
pub mod types;

pub use schema::{CatalogSchema, build_schema};
