//! Request authentication context
//!
//! One resolution per inbound request: bearer header in, current user out.
//! The three outcomes are deliberately distinct. No header (or a different
//! scheme) is an anonymous request; a presented token that fails
//! verification is a hard error the transport turns into a reject; a
//! verified token whose subject no longer exists is anonymous again.

use async_graphql::{Context, ErrorExtensions, Result};

use crate::error::CatalogError;
use crate::services::TokenService;
use crate::store::{CatalogStore, UserRecord};

/// The user this request authenticated as, attached as context data.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

fn strip_bearer(header: &str) -> Option<&str> {
    let scheme = header.get(..7)?;
    let token = header.get(7..)?;
    scheme.eq_ignore_ascii_case("bearer ").then_some(token)
}

/// Resolve the current user from a raw `Authorization` header value.
pub async fn resolve_current_user(
    authorization: Option<&str>,
    tokens: &TokenService,
    store: &CatalogStore,
) -> Result<Option<UserRecord>, CatalogError> {
    let Some(token) = authorization.and_then(strip_bearer) else {
        return Ok(None);
    };
    resolve_token_user(token, tokens, store).await
}

/// Resolve the current user from a bare token, as carried in websocket
/// `connection_init` params.
pub async fn resolve_token_user(
    token: &str,
    tokens: &TokenService,
    store: &CatalogStore,
) -> Result<Option<UserRecord>, CatalogError> {
    let claims = tokens.verify(token)?;

    let user = store.users().find_by_id(&claims.sub).await?;
    if user.is_none() {
        tracing::debug!(sub = %claims.sub, "token subject no longer exists, request is anonymous");
    }
    Ok(user)
}

/// Extension trait to pull the current user out of GraphQL context
pub trait AuthExt {
    /// The current user, or an UNAUTHORIZED error for anonymous requests
    fn current_user(&self) -> Result<&UserRecord>;

    /// The current user if present
    fn try_current_user(&self) -> Option<&UserRecord>;
}

impl AuthExt for Context<'_> {
    fn current_user(&self) -> Result<&UserRecord> {
        self.try_current_user()
            .ok_or_else(|| CatalogError::NotAuthenticated.extend())
    }

    fn try_current_user(&self) -> Option<&UserRecord> {
        self.data_opt::<CurrentUser>().map(|current| &current.0)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use crate::store::CreateUser;

    use super::*;

    fn tokens() -> TokenService {
        TokenService::new("context-test-secret", 3600)
    }

    async fn store_with_ada() -> (CatalogStore, UserRecord) {
        let store = CatalogStore::in_memory();
        let user = store
            .users()
            .create(CreateUser {
                username: "ada".into(),
                favorite_genre: "scifi".into(),
            })
            .await
            .unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn absent_header_is_anonymous() {
        let store = CatalogStore::in_memory();
        let resolved = resolve_current_user(None, &tokens(), &store).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn other_schemes_are_anonymous() {
        let store = CatalogStore::in_memory();
        for header in ["Basic dXNlcjpwdw==", "Token abc123", "bearer", "short"] {
            let resolved = resolve_current_user(Some(header), &tokens(), &store)
                .await
                .unwrap();
            assert!(resolved.is_none(), "{header:?} should not authenticate");
        }
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_a_hard_error() {
        // Observably different from the anonymous cases above.
        let store = CatalogStore::in_memory();
        let err = resolve_current_user(Some("Bearer not-a-real-token"), &tokens(), &store)
            .await
            .unwrap_err();
        assert_matches!(err, CatalogError::InvalidToken(_));
    }

    #[tokio::test]
    async fn valid_token_resolves_its_user() {
        let (store, user) = store_with_ada().await;
        let tokens = tokens();
        let token = tokens.issue(&user.username, &user.id).unwrap();

        for scheme in ["Bearer", "bearer", "BEARER"] {
            let resolved = resolve_current_user(Some(&format!("{scheme} {token}")), &tokens, &store)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(resolved.id, user.id);
            assert_eq!(resolved.username, "ada");
        }
    }

    #[tokio::test]
    async fn valid_token_for_missing_user_is_anonymous() {
        let store = CatalogStore::in_memory();
        let tokens = tokens();
        let token = tokens.issue("ghost", "deleted-user-id").unwrap();

        let resolved = resolve_current_user(Some(&format!("Bearer {token}")), &tokens, &store)
            .await
            .unwrap();
        assert!(resolved.is_none());
    }
}
