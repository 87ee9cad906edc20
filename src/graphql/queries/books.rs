use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Total number of books in the catalog
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let count = store
            .books()
            .count(BookFilter::default())
            .await
            .map_err(CatalogError::from)
            .extend()?;
        Ok(count as i32)
    }

    /// Books in the catalog, optionally narrowed by author name and genre.
    /// Both predicates are evaluated by the store.
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let store = ctx.data_unchecked::<CatalogStore>();
        let books = store
            .books()
            .find(BookFilter { author, genre })
            .await
            .map_err(CatalogError::from)
            .extend()?;
        Ok(books.into_iter().map(Book::from).collect())
    }
}
