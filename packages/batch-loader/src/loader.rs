//! Batch coordinator
//!
//! Each [`BatchLoader`] owns at most one open window at a time. The first
//! `load` after an idle period opens it and spawns a dispatch task; every
//! `load` that arrives before the window closes joins the same batch. When the
//! window closes the task takes the batch, calls the fetcher once with the
//! distinct keys and settles every waiting caller. The next `load` opens a new
//! window, so a loader serves any number of sequential waves.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::try_join_all;
use futures_util::FutureExt;
use tokio::sync::{oneshot, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::BatchConfig;
use crate::error::LoadError;
use crate::fetcher::{BulkFetcher, Cardinality};

type Waiter<V, E> = oneshot::Sender<Result<V, LoadError<E>>>;

/// Requests collected during one window
struct Batch<K, V, E> {
    /// Distinct keys in first-request order
    keys: Vec<K>,
    waiters: HashMap<K, Vec<Waiter<V, E>>>,
}

impl<K, V, E> Default for Batch<K, V, E> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            waiters: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, E> Batch<K, V, E> {
    fn push(&mut self, key: K, waiter: Waiter<V, E>) {
        match self.waiters.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().push(waiter),
            Entry::Vacant(entry) => {
                self.keys.push(entry.key().clone());
                entry.insert(vec![waiter]);
            }
        }
    }

    fn requests(&self) -> usize {
        self.waiters.values().map(Vec::len).sum()
    }
}

struct State<K, V, E> {
    batch: Batch<K, V, E>,
    /// Closes the open window early; `None` while no window is open
    close: Option<Arc<Notify>>,
}

struct Inner<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: BulkFetcher<K>,
{
    name: &'static str,
    fetcher: F,
    config: BatchConfig,
    cancel: CancellationToken,
    state: Mutex<State<K, F::Value, F::Error>>,
}

/// Coalesces concurrent single-key lookups into one bulk fetch per window
///
/// Clones share the same pending batch.
pub struct BatchLoader<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: BulkFetcher<K>,
{
    inner: Arc<Inner<K, F>>,
}

impl<K, F> Clone for BatchLoader<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: BulkFetcher<K>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, F> BatchLoader<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: BulkFetcher<K>,
{
    /// Create an idle loader
    ///
    /// `name` identifies the access path in logs. Cancelling `cancel` fails
    /// every pending and future `load` with [`LoadError::Cancelled`] and drops
    /// an in-flight fetch.
    pub fn new(
        name: &'static str,
        fetcher: F,
        config: BatchConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                fetcher,
                config,
                cancel,
                state: Mutex::new(State {
                    batch: Batch::default(),
                    close: None,
                }),
            }),
        }
    }

    /// Access path name used in logs
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Load the value for `key`
    ///
    /// Suspends until the batch this call joined has been fetched. Keys the
    /// fetcher did not return resolve to [`Cardinality::absent`].
    pub async fn load(&self, key: K) -> Result<F::Value, LoadError<F::Error>> {
        if self.inner.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }

        let (tx, rx) = oneshot::channel();
        self.enqueue(key, tx);

        // The sender is only dropped unsettled if the dispatch task died
        rx.await.unwrap_or(Err(LoadError::Aborted))
    }

    /// Load several keys, joining the same window
    pub async fn load_many<I>(
        &self,
        keys: I,
    ) -> Result<HashMap<K, F::Value>, LoadError<F::Error>>
    where
        I: IntoIterator<Item = K>,
    {
        let loads = keys.into_iter().map(|key| async move {
            let value = self.load(key.clone()).await?;
            Ok::<_, LoadError<F::Error>>((key, value))
        });

        Ok(try_join_all(loads).await?.into_iter().collect())
    }

    /// Close the open window now instead of waiting for the timer
    ///
    /// Does nothing when no window is open.
    pub fn flush(&self) {
        if let Some(close) = &self.inner.lock_state().close {
            close.notify_one();
        }
    }

    fn enqueue(&self, key: K, waiter: Waiter<F::Value, F::Error>) {
        let mut state = self.inner.lock_state();
        state.batch.push(key, waiter);
        let full = state.batch.keys.len() >= self.inner.config.max_batch_size;

        let close = match &state.close {
            Some(close) => Arc::clone(close),
            None => {
                let close = Arc::new(Notify::new());
                state.close = Some(Arc::clone(&close));
                tokio::spawn(Arc::clone(&self.inner).run_window(Arc::clone(&close)));
                close
            }
        };

        if full {
            close.notify_one();
        }
    }
}

impl<K, F> Inner<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: BulkFetcher<K>,
{
    fn lock_state(&self) -> MutexGuard<'_, State<K, F::Value, F::Error>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_batch(&self) -> Batch<K, F::Value, F::Error> {
        let mut state = self.lock_state();
        state.close = None;
        mem::take(&mut state.batch)
    }

    async fn run_window(self: Arc<Self>, close: Arc<Notify>) {
        tokio::select! {
            _ = tokio::time::sleep(self.config.window) => {}
            _ = close.notified() => {}
            _ = self.cancel.cancelled() => {}
        }

        let batch = self.take_batch();
        if batch.keys.is_empty() {
            return;
        }

        let result = if self.cancel.is_cancelled() {
            Err(LoadError::Cancelled)
        } else {
            debug!(
                loader = self.name,
                keys = batch.keys.len(),
                requests = batch.requests(),
                "Dispatching batch"
            );

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(LoadError::Cancelled),
                result = AssertUnwindSafe(self.fetcher.fetch(&batch.keys)).catch_unwind() => {
                    match result {
                        Ok(result) => result.map_err(LoadError::Fetch),
                        Err(_) => {
                            error!(loader = self.name, keys = batch.keys.len(), "Bulk fetch panicked");
                            Err(LoadError::Aborted)
                        }
                    }
                }
            }
        };

        self.settle(batch.waiters, result);
    }

    fn settle(
        &self,
        waiters: HashMap<K, Vec<Waiter<F::Value, F::Error>>>,
        result: Result<HashMap<K, F::Value>, LoadError<F::Error>>,
    ) {
        // A failed send means the caller stopped waiting
        match result {
            Ok(mut values) => {
                for (key, senders) in waiters {
                    let value = values
                        .remove(&key)
                        .unwrap_or_else(<F::Value as Cardinality>::absent);
                    for sender in senders {
                        let _ = sender.send(Ok(value.clone()));
                    }
                }
            }
            Err(err) => {
                if err.is_cancelled() {
                    debug!(loader = self.name, "Batch cancelled");
                } else {
                    warn!(loader = self.name, error = %err, "Bulk fetch failed");
                }

                for sender in waiters.into_values().flatten() {
                    let _ = sender.send(Err(err.clone()));
                }
            }
        }
    }
}
