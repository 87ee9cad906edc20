use super::prelude::*;

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    /// Set an author's birth year. Requires authentication. Editing an
    /// author the catalog does not know is a NOT_FOUND error, never a
    /// silent no-op.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Author> {
        ctx.current_user()?;
        let store = ctx.data_unchecked::<CatalogStore>();

        let Some(author) = store
            .authors()
            .find_by_name(&name)
            .await
            .map_err(CatalogError::from)
            .extend()?
        else {
            return Err(CatalogError::not_found("author", &name).extend());
        };

        let updated = store
            .authors()
            .set_born(&author.id, set_born_to)
            .await
            .map_err(CatalogError::from)
            .extend()?
            .ok_or_else(|| CatalogError::not_found("author", &name).extend())?;

        tracing::info!(author = %updated.name, born = set_born_to, "author updated");
        Ok(updated.into())
    }
}
