//! In-process publish/subscribe bus
//!
//! Topic-keyed fan-out with one unbounded queue per subscriber channel.
//! Publishes on a topic are serialized under the registry lock, so every
//! channel observes the same relative order; a slow consumer buffers in its
//! own queue and never blocks the publisher or its siblings. There is no
//! replay: a channel only sees payloads published after it registered.
//!
//! Channels unregister themselves when their handle drops, and a publish
//! prunes any channel whose receiving side is already gone, so closing
//! concurrently with publishing is always safe.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

struct Channel<T> {
    id: u64,
    tx: mpsc::UnboundedSender<T>,
}

struct Registry<T> {
    topics: Mutex<HashMap<String, Vec<Channel<T>>>>,
    next_id: AtomicU64,
}

/// Cloneable bus handle. All clones share one registry; the process creates
/// a single bus in `main` and injects it, tests build their own.
pub struct EventBus<T> {
    inner: Arc<Registry<T>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Registry {
                topics: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a new channel on a topic. The handle yields every payload
    /// published after this call, in publish order, and unregisters itself
    /// on drop.
    pub fn subscribe(&self, topic: &str) -> ChannelHandle<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .topics
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push(Channel { id, tx });
        tracing::debug!(topic, channel = id, "channel subscribed");
        ChannelHandle {
            topic: topic.to_string(),
            id,
            rx,
            bus: self.clone(),
        }
    }

    /// Number of live channels on a topic.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner.topics.lock().get(topic).map_or(0, Vec::len)
    }

    fn unsubscribe(&self, topic: &str, id: u64) {
        let mut topics = self.inner.topics.lock();
        if let Some(channels) = topics.get_mut(topic) {
            channels.retain(|ch| ch.id != id);
            if channels.is_empty() {
                topics.remove(topic);
            }
        }
        tracing::debug!(topic, channel = id, "channel unsubscribed");
    }
}

impl<T: Clone> EventBus<T> {
    /// Deliver a payload to every channel currently on the topic, pruning
    /// channels whose receiver is gone. Publishing to a topic nobody
    /// listens on is a no-op. Returns how many channels got the payload.
    pub fn publish(&self, topic: &str, payload: T) -> usize {
        let mut topics = self.inner.topics.lock();
        let Some(channels) = topics.get_mut(topic) else {
            return 0;
        };
        let before = channels.len();
        channels.retain(|ch| ch.tx.send(payload.clone()).is_ok());
        let delivered = channels.len();
        if channels.is_empty() {
            topics.remove(topic);
        }
        if delivered < before {
            tracing::debug!(topic, pruned = before - delivered, "pruned closed channels");
        }
        delivered
    }
}

/// Live subscription to one topic. Await payloads with [`recv`] or poll it
/// as a `Stream`; either way, dropping the handle removes the channel from
/// the registry exactly once.
///
/// [`recv`]: ChannelHandle::recv
pub struct ChannelHandle<T> {
    topic: String,
    id: u64,
    rx: mpsc::UnboundedReceiver<T>,
    bus: EventBus<T>,
}

impl<T> ChannelHandle<T> {
    /// Await the next payload.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl<T> Stream for ChannelHandle<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for ChannelHandle<T> {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.topic, self.id);
    }
}
