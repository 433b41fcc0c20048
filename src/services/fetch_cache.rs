use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::api::{ApiError, FetchError};

/// Loading/error/data record for one tracked endpoint.
///
/// `loading` starts true so consumers render placeholders until the first
/// request settles. A failed request keeps the previous `data` (no silent
/// clearing) and records the error alongside it.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub error: Option<FetchError>,
    pub loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

type BoxedFetch<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;
type Producer<T> = Arc<dyn Fn() -> BoxedFetch<T> + Send + Sync>;

/// Cache-and-loading-state wrapper around one asynchronous producer.
///
/// Every request is stamped with a monotone sequence number; a result only
/// commits if no newer request has started since. Superseded results are
/// discarded whatever order they arrive in, so the state always reflects
/// the last request issued, never the last response received.
pub struct FetchCell<T> {
    state: Arc<RwLock<FetchState<T>>>,
    seq: Arc<AtomicU64>,
    producer: Arc<RwLock<Option<Producer<T>>>>,
}

impl<T> Clone for FetchCell<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            seq: Arc::clone(&self.seq),
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for FetchCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> FetchCell<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(FetchState::default())),
            seq: Arc::new(AtomicU64::new(0)),
            producer: Arc::new(RwLock::new(None)),
        }
    }

    /// Issues a fetch through `producer`, remembering it for [`refetch`].
    /// Call again whenever a dependency key changes; the newer call
    /// supersedes any in-flight one.
    ///
    /// [`refetch`]: FetchCell::refetch
    pub async fn load<F, Fut>(&self, producer: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let producer: Producer<T> = Arc::new(move || Box::pin(producer()));
        *self.producer.write() = Some(Arc::clone(&producer));
        self.run(producer()).await;
    }

    /// Re-runs the most recent producer with the same supersede rules as a
    /// fresh [`load`](FetchCell::load). No-op before the first load.
    pub async fn refetch(&self) {
        let producer = self.producer.read().clone();
        match producer {
            Some(producer) => self.run(producer()).await,
            None => tracing::warn!("refetch called before any load"),
        }
    }

    // State transitions only on behalf of the newest request; the sequence
    // re-check shares the critical section with each write, so a request
    // superseded mid-flight can neither commit its result nor re-raise the
    // loading flag after the winner has settled.
    async fn run(&self, fetch: BoxedFetch<T>) {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            if self.seq.load(Ordering::SeqCst) == my_seq {
                state.loading = true;
                state.error = None;
            }
        }

        let result = fetch.await;

        let mut state = self.state.write();
        if self.seq.load(Ordering::SeqCst) != my_seq {
            debug!(seq = my_seq, "discarding superseded fetch result");
            return;
        }
        state.loading = false;
        match result {
            Ok(data) => state.data = Some(data),
            Err(err) => state.error = Some(err.into()),
        }
    }

    /// Snapshot of the current record.
    pub fn state(&self) -> FetchState<T> {
        self.state.read().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.read().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.read().error.clone()
    }
}
