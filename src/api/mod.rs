//! HTTP route definitions
//!
//! The API itself is GraphQL at /graphql; these routes cover the probes
//! deployments expect outside of it.

pub mod health;
