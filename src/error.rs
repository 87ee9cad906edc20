//! Error taxonomy for the catalog API
//!
//! Every failure a resolver can surface is one of these variants. The
//! `ErrorExtensions` impl attaches a stable `code` extension so clients can
//! branch on the kind without parsing messages; validation failures also
//! carry the offending field and value.

use async_graphql::ErrorExtensions;

use crate::store::StoreError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// A token was presented but failed verification. Never downgraded to
    /// anonymous; the transport layer turns this into a hard reject.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// An authenticated-only operation was attempted without a current user.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Login with an unknown username or a wrong password.
    #[error("wrong credentials")]
    InvalidCredentials,

    /// A field constraint was violated.
    #[error("{field} {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A mutation targeted a record that does not exist.
    #[error("{kind} not found: {name:?}")]
    NotFound { kind: &'static str, name: String },

    /// Store collaborator failure unrelated to the request's input.
    #[error("store backend error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidToken(_) | Self::NotAuthenticated => "UNAUTHORIZED",
            Self::InvalidCredentials | Self::Validation { .. } => "BAD_USER_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation {
                field,
                value,
                reason,
            } => Self::Validation {
                field,
                value,
                reason,
            },
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Self::Validation { field, value, .. } = self {
                e.set("field", *field);
                e.set("value", value.as_str());
            }
        })
    }
}
