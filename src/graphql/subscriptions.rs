//! GraphQL subscriptions
//!
//! Each active subscription holds one bus channel; the resolver returns the
//! channel mapped into the output type, so dropping the response stream on
//! disconnect releases the channel.

use async_graphql::{Context, Result, Subscription};
use futures::{Stream, StreamExt};

use crate::graphql::types::Book;
use crate::services::EventBus;
use crate::store::BookWithAuthor;

/// Topic carrying one event per successfully persisted book.
pub const BOOK_ADDED_TOPIC: &str = "bookAdded";

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Emits every book added after this subscription opened, in creation
    /// order. No replay of earlier books.
    async fn book_added(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Book>> {
        let bus = ctx.data_unchecked::<EventBus<BookWithAuthor>>();
        let channel = bus.subscribe(BOOK_ADDED_TOPIC);
        Ok(channel.map(Book::from))
    }
}
