//! Mutable state of a loader instance, always accessed under its mutex

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::oneshot;

use super::{LoadError, LoaderPhase};

type Waiter<V, E> = oneshot::Sender<Result<V, LoadError<E>>>;

/// Outcome of registering interest in a key
pub(super) enum Lookup<V, E> {
    Hit(V),
    Rejected,
    Wait(oneshot::Receiver<Result<V, LoadError<E>>>),
}

pub(super) struct State<K, V, E> {
    pub(super) phase: LoaderPhase,
    pub(super) closed: bool,
    /// Keys queued for the next batch, in arrival order
    pub(super) pending: Vec<K>,
    /// Callers per key, covering both queued and in-flight keys
    waiters: HashMap<K, Vec<Waiter<V, E>>>,
    /// Append-only for the lifetime of the instance
    cache: HashMap<K, V>,
}

impl<K, V, E> State<K, V, E>
where
    K: Hash + Eq + Clone,
    V: Clone + Default,
    E: Clone,
{
    pub(super) fn new() -> Self {
        Self {
            phase: LoaderPhase::Idle,
            closed: false,
            pending: Vec::new(),
            waiters: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Serve from cache, or subscribe the caller to the key's batch. A key
    /// that is already queued or in flight is not queued a second time.
    pub(super) fn register(&mut self, key: K) -> Lookup<V, E> {
        if self.closed {
            return Lookup::Rejected;
        }
        if let Some(value) = self.cache.get(&key) {
            return Lookup::Hit(value.clone());
        }

        let (sender, receiver) = oneshot::channel();
        match self.waiters.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().push(sender),
            Entry::Vacant(entry) => {
                self.pending.push(entry.key().clone());
                entry.insert(vec![sender]);
            }
        }
        Lookup::Wait(receiver)
    }

    /// Move up to `max` queued keys into flight
    pub(super) fn take_batch(&mut self, max: usize) -> Option<Vec<K>> {
        if self.pending.is_empty() {
            self.phase = LoaderPhase::Idle;
            return None;
        }
        let size = self.pending.len().min(max);
        self.phase = LoaderPhase::Dispatching;
        Some(self.pending.drain(..size).collect())
    }

    /// Resolve every caller of a finished batch. Returns whether more keys
    /// are queued, in which case the dispatcher keeps running.
    pub(super) fn complete(
        &mut self,
        keys: Vec<K>,
        result: Result<HashMap<K, V>, LoadError<E>>,
    ) -> bool {
        match result {
            Ok(mut values) => {
                for key in keys {
                    let value = values.remove(&key).unwrap_or_default();
                    if let Some(waiters) = self.waiters.remove(&key) {
                        for waiter in waiters {
                            let _ = waiter.send(Ok(value.clone()));
                        }
                    }
                    if !self.closed {
                        self.cache.insert(key, value);
                    }
                }
            }
            Err(error) => {
                for key in &keys {
                    if let Some(waiters) = self.waiters.remove(key) {
                        for waiter in waiters {
                            let _ = waiter.send(Err(error.clone()));
                        }
                    }
                }
            }
        }

        if self.pending.is_empty() {
            self.phase = LoaderPhase::Idle;
            false
        } else {
            self.phase = LoaderPhase::Accumulating;
            true
        }
    }

    /// Reject all outstanding callers. Returns how many were rejected.
    pub(super) fn close(&mut self) -> usize {
        self.closed = true;
        self.pending.clear();

        let mut rejected = 0;
        for (_, waiters) in self.waiters.drain() {
            for waiter in waiters {
                rejected += 1;
                let _ = waiter.send(Err(LoadError::Closed));
            }
        }
        rejected
    }
}
