//! Per-resource state and fan-out machinery
//!
//! A [`ResourceHub`] owns everything mutable for one resource key: the last
//! fetched value, the subscriber set, and the in-flight refresh marker. All
//! of it lives behind a single lock scoped to the hub, so different keys
//! never contend. The lock is never held across an await; the in-flight
//! marker is what serializes fetches.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use toot_client::ClientError;

use crate::registry::ResourceKey;
use crate::RefreshError;

/// Bound on each subscriber's pending-value queue. A subscriber that falls
/// this far behind is disconnected rather than allowed to stall broadcasts.
pub const SUBSCRIBER_CAPACITY: usize = 16;

struct Subscriber<T> {
    id: u64,
    tx: mpsc::Sender<T>,
}

struct HubState<T> {
    last_value: Option<T>,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
    in_flight: Option<broadcast::Sender<Result<T, RefreshError>>>,
}

impl<T> HubState<T> {
    fn new() -> Self {
        Self { last_value: None, subscribers: Vec::new(), next_id: 0, in_flight: None }
    }
}

/// State machine for one resource key: Empty -> Populated <-> Refreshing
pub struct ResourceHub<T: Clone + Send + 'static> {
    key: ResourceKey,
    state: Arc<Mutex<HubState<T>>>,
}

impl<T: Clone + Send + 'static> ResourceHub<T> {
    /// Create an empty hub for a key
    pub fn new(key: ResourceKey) -> Self {
        Self { key, state: Arc::new(Mutex::new(HubState::new())) }
    }

    /// Register a new subscriber
    ///
    /// If a last value exists it is queued immediately, so it is the first
    /// item the stream produces; every later successful refresh follows.
    pub fn subscribe(&self) -> ResourceStream<T> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        let mut state = self.state.lock();
        if let Some(value) = &state.last_value {
            // Capacity is at least 1 and the queue is empty, cannot fail.
            let _ = tx.try_send(value.clone());
        }
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push(Subscriber { id, tx });
        tracing::debug!(key = %self.key, subscriber = id, "subscriber registered");
        ResourceStream { rx, id, state: Arc::clone(&self.state) }
    }

    /// Fetch now and publish the result
    ///
    /// If a refresh for this key is already in flight, awaits that attempt's
    /// outcome instead of issuing a second fetch. On success the value
    /// replaces `last_value` wholesale and is pushed to every subscriber in
    /// subscription order. On failure the previous value stays visible and
    /// only refresh callers see the error.
    pub async fn refresh<F, Fut>(&self, fetch: F) -> Result<T, RefreshError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let tx = match self.begin_refresh() {
            Ok(tx) => tx,
            Err(mut rx) => {
                tracing::debug!(key = %self.key, "coalescing onto in-flight refresh");
                return match rx.recv().await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(RefreshError::Interrupted),
                };
            }
        };

        // Clears the marker if this task is cancelled mid-fetch, so a later
        // refresh is never wedged behind a fetch that will not finish.
        let mut guard = InFlightGuard { state: Arc::clone(&self.state), armed: true };

        let result = fetch().await;

        let outcome = {
            let mut state = self.state.lock();
            state.in_flight = None;
            match result {
                Ok(value) => {
                    state.last_value = Some(value.clone());
                    self.broadcast(&mut state, &value);
                    Ok(value)
                }
                Err(err) => {
                    tracing::debug!(key = %self.key, error = %err, "refresh failed");
                    Err(RefreshError::from(err))
                }
            }
        };
        guard.armed = false;

        // No receivers just means nobody coalesced onto this attempt.
        let _ = tx.send(outcome.clone());
        outcome
    }

    /// Claim the in-flight marker, or return a receiver for the attempt
    /// already running. Kept synchronous so the lock guard is never part of
    /// the `refresh` future (which must stay `Send`).
    fn begin_refresh(
        &self,
    ) -> Result<
        broadcast::Sender<Result<T, RefreshError>>,
        broadcast::Receiver<Result<T, RefreshError>>,
    > {
        let mut state = self.state.lock();
        if let Some(in_flight) = &state.in_flight {
            return Err(in_flight.subscribe());
        }
        let (tx, _) = broadcast::channel(1);
        state.in_flight = Some(tx.clone());
        Ok(tx)
    }

    fn broadcast(&self, state: &mut HubState<T>, value: &T) {
        let key = self.key;
        state.subscribers.retain(|sub| match sub.tx.try_send(value.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(key = %key, subscriber = sub.id, "subscriber queue full, disconnecting");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

impl<T: Clone + Send + 'static> Drop for ResourceHub<T> {
    fn drop(&mut self) {
        // Registry teardown: dropping the senders ends every open stream.
        let mut state = self.state.lock();
        state.subscribers.clear();
        state.in_flight = None;
    }
}

struct InFlightGuard<T> {
    state: Arc<Mutex<HubState<T>>>,
    armed: bool,
}

impl<T> Drop for InFlightGuard<T> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().in_flight = None;
        }
    }
}

/// An open subscription to one resource key
///
/// Produces the current value (if any) followed by every value published by
/// a successful refresh, indefinitely. Dropping the stream removes the
/// subscriber from the hub before the next broadcast.
pub struct ResourceStream<T: Clone + Send + 'static> {
    rx: mpsc::Receiver<T>,
    id: u64,
    state: Arc<Mutex<HubState<T>>>,
}

impl<T: Clone + Send + 'static> ResourceStream<T> {
    /// Receive the next value
    ///
    /// Returns `None` only when the owning registry has been torn down.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T: Clone + Send + 'static> futures_util::Stream for ResourceStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T: Clone + Send + 'static> Drop for ResourceStream<T> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.subscribers.retain(|sub| sub.id != self.id);
    }
}
