use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Total number of authors in the catalog
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let count = store
            .authors()
            .count()
            .await
            .map_err(CatalogError::from)
            .extend()?;
        Ok(count as i32)
    }

    /// All authors, in catalog order
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let authors = store
            .authors()
            .list()
            .await
            .map_err(CatalogError::from)
            .extend()?;
        Ok(authors.into_iter().map(Author::from).collect())
    }
}
