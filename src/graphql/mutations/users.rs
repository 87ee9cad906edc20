use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Create a user account. No authentication required.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
    ) -> Result<User> {
        let store = ctx.data_unchecked::<CatalogStore>();

        if store
            .users()
            .exists_by_username(&username)
            .await
            .map_err(CatalogError::from)
            .extend()?
        {
            return Err(CatalogError::Validation {
                field: "username",
                value: username,
                reason: "already exists".into(),
            }
            .extend());
        }

        let user = store
            .users()
            .create(CreateUser {
                username,
                favorite_genre,
            })
            .await
            .map_err(CatalogError::from)
            .extend()?;

        tracing::info!(username = %user.username, "user created");
        Ok(user.into())
    }

    /// Exchange credentials for a bearer token. The password check is
    /// whatever verifier the deployment wired in.
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Token> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let tokens = ctx.data_unchecked::<TokenService>();
        let verifier = ctx.data_unchecked::<Arc<dyn CredentialVerifier>>();

        let user = match store
            .users()
            .find_by_username(&username)
            .await
            .map_err(CatalogError::from)
            .extend()?
        {
            Some(user) if verifier.verify(&user, &password) => user,
            _ => {
                tracing::warn!(username = %username, "failed login attempt");
                return Err(CatalogError::InvalidCredentials.extend());
            }
        };

        let value = tokens.issue(&user.username, &user.id).extend()?;
        tracing::info!(username = %user.username, "user logged in");
        Ok(Token { value })
    }
}
