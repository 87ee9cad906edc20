use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book to the catalog. Requires authentication. Every open
    /// bookAdded subscription is notified once the record is persisted;
    /// a rejected insert notifies nobody.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> Result<Book> {
        let user = ctx.current_user()?;
        let store = ctx.data_unchecked::<CatalogStore>();
        let bus = ctx.data_unchecked::<EventBus<BookWithAuthor>>();

        let book = store
            .books()
            .create(CreateBook {
                title,
                author,
                published,
                genres,
            })
            .await
            .map_err(CatalogError::from)
            .extend()?;

        let delivered = bus.publish(BOOK_ADDED_TOPIC, book.clone());
        tracing::info!(
            title = %book.title,
            author = %book.author.name,
            added_by = %user.username,
            subscribers = delivered,
            "book added"
        );

        Ok(book.into())
    }
}
