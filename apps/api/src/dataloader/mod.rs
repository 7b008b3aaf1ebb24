//! Request-scoped batching and caching of keyed lookups
//!
//! A [`DataLoader`] collects individual `load(key)` calls made while a GraphQL
//! request is being resolved, waits for a short coalescing window, and then
//! hands every distinct key to its [`Loader`] in one call. Results are
//! memoized for the lifetime of the instance, so a loader must be created per
//! request and dropped (or [closed](DataLoader::close)) with it.
//!
//! ```text
//!   Idle ──load()──▶ Accumulating ──window elapsed──▶ Dispatching
//!    ▲                    ▲                               │
//!    │                    └──── keys arrived meanwhile ◀──┤
//!    └──────────────────── queue drained ◀────────────────┘
//! ```

mod state;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use futures_util::FutureExt;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::Notify;

use state::{Lookup, State};

/// Default coalescing window before a batch is dispatched
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1);

/// Default upper bound on keys handed to a single [`Loader::load`] call
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// A batch fetch function
///
/// Implementations receive a slice of distinct keys and must resolve all of
/// them with a single round trip to the backing store. Keys missing from the
/// returned map resolve to `Value::default()`.
pub trait Loader<K>: Send + Sync + 'static
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
{
    /// Value produced for a single key
    type Value: Send + Sync + Clone + Default + 'static;

    /// Error shared by every caller of a failed batch
    type Error: Send + Sync + Clone + fmt::Display + 'static;

    /// Load a batch of keys
    fn load(
        &self,
        keys: &[K],
    ) -> impl Future<Output = Result<HashMap<K, Self::Value>, Self::Error>> + Send;
}

/// Observable lifecycle state of a loader instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Nothing queued, nothing in flight
    Idle,
    /// Keys are queued and a dispatch is scheduled
    Accumulating,
    /// A batch fetch is running
    Dispatching,
}

/// Failure observed by a `load` caller
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError<E> {
    /// The batch containing this key failed
    #[error("batch fetch failed: {0}")]
    Fetch(E),

    /// The batch fetch panicked before producing a result
    #[error("batch fetch panicked")]
    Panicked,

    /// The owning request ended before the key was resolved
    #[error("loader closed before the key was resolved")]
    Closed,
}

/// Tuning knobs for a loader instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// How long to accumulate keys before dispatching. Zero yields once to
    /// the scheduler instead of sleeping.
    pub delay: Duration,
    /// Maximum number of keys per batch; larger queues are split into
    /// sequential batches
    pub max_batch_size: usize,
}

impl LoaderOptions {
    /// Set the coalescing window
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the batch size cap (at least one key per batch)
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Batching, memoizing front for a [`Loader`]
///
/// Cloning is cheap and every clone shares the same queue and cache.
pub struct DataLoader<K, L>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    inner: Arc<Inner<K, L>>,
}

impl<K, L> Clone for DataLoader<K, L>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, L> DataLoader<K, L>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    /// Wrap a batch fetch function
    pub fn new(loader: L, options: LoaderOptions) -> Self {
        let options = options.with_max_batch_size(options.max_batch_size);
        Self {
            inner: Arc::new(Inner {
                loader,
                options,
                state: Mutex::new(State::new()),
                batch_full: Notify::new(),
            }),
        }
    }

    /// Resolve a single key
    ///
    /// Cached keys return immediately. Otherwise the key joins the current
    /// accumulation window and the call suspends until its batch completes.
    /// Must be called from within a tokio runtime.
    pub async fn load(&self, key: K) -> Result<L::Value, LoadError<L::Error>> {
        match self.inner.enqueue(key) {
            Lookup::Hit(value) => Ok(value),
            Lookup::Rejected => Err(LoadError::Closed),
            Lookup::Wait(receiver) => receiver.await.unwrap_or(Err(LoadError::Closed)),
        }
    }

    /// Resolve several keys, sharing batches with any concurrent callers
    pub async fn load_many<I>(&self, keys: I) -> Result<HashMap<K, L::Value>, LoadError<L::Error>>
    where
        I: IntoIterator<Item = K>,
    {
        let lookups = keys.into_iter().map(|key| async move {
            let value = self.load(key.clone()).await?;
            Ok::<_, LoadError<L::Error>>((key, value))
        });
        Ok(try_join_all(lookups).await?.into_iter().collect())
    }

    /// Reject every pending handle and refuse further loads
    ///
    /// A fetch already in flight is allowed to finish, but its results are
    /// discarded.
    pub fn close(&self) {
        let rejected = self.inner.state.lock().close();
        if rejected > 0 {
            tracing::debug!(rejected, "Loader closed with pending lookups");
        }
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Current lifecycle state
    pub fn phase(&self) -> LoaderPhase {
        self.inner.state.lock().phase
    }
}

struct Inner<K, L>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    loader: L,
    options: LoaderOptions,
    state: Mutex<State<K, L::Value, L::Error>>,
    batch_full: Notify,
}

impl<K, L> Inner<K, L>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    fn enqueue(self: &Arc<Self>, key: K) -> Lookup<L::Value, L::Error> {
        let mut state = self.state.lock();
        let lookup = state.register(key);

        if state.pending.len() >= self.options.max_batch_size {
            self.batch_full.notify_one();
        }
        if matches!(lookup, Lookup::Wait(_)) && state.phase == LoaderPhase::Idle {
            state.phase = LoaderPhase::Accumulating;
            tokio::spawn(Arc::clone(self).dispatch());
        }
        lookup
    }

    /// Dispatcher task: one per accumulation cycle, exits once the queue is
    /// drained so that the next `load` starts a fresh cycle.
    async fn dispatch(self: Arc<Self>) {
        loop {
            self.coalesce().await;

            let batch = self.state.lock().take_batch(self.options.max_batch_size);
            let Some(keys) = batch else {
                return;
            };

            tracing::debug!(batch_size = keys.len(), "Dispatching loader batch");
            // A panicking fetch must still settle its waiters and the phase
            let result = match AssertUnwindSafe(self.loader.load(&keys))
                .catch_unwind()
                .await
            {
                Ok(Ok(values)) => Ok(values),
                Ok(Err(error)) => {
                    tracing::warn!(error = %error, batch_size = keys.len(), "Loader batch failed");
                    Err(LoadError::Fetch(error))
                }
                Err(_) => {
                    tracing::error!(batch_size = keys.len(), "Loader batch panicked");
                    Err(LoadError::Panicked)
                }
            };

            let more = self.state.lock().complete(keys, result);
            if !more {
                return;
            }
        }
    }

    async fn coalesce(&self) {
        let full = self.state.lock().pending.len() >= self.options.max_batch_size;
        if full {
            return;
        }

        if self.options.delay.is_zero() {
            tokio::task::yield_now().await;
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.options.delay) => {}
            _ = self.batch_full.notified() => {}
        }
    }
}
