//! Deferred on-chain operations.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::{Builder, Handle};

use crate::error::{Error, Result};
use crate::remote::pool::{PendingCall, WorkerPool};

type Factory<T> = dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync;

/// A computation that runs the whole build → sign → submit → confirm
/// pipeline (or a read-only query) each time it is invoked.
///
/// Nothing happens until one of [`send`](Self::send),
/// [`send_async`](Self::send_async) or [`call`](Self::call) is used; each
/// invocation runs the computation exactly once and results are not cached.
pub struct RemoteCall<T> {
    factory: Arc<Factory<T>>,
}

impl<T> Clone for RemoteCall<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<T> std::fmt::Debug for RemoteCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCall").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> RemoteCall<T> {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// A call that fails with `error` when invoked.
    pub fn failed(error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        Self::new(move || {
            let error = error();
            async move { Err(error) }
        })
    }

    /// Run on the caller's thread and block until done.
    ///
    /// Uses a private current-thread runtime, so it must not be called from
    /// inside an async context; use [`call`](Self::call) there.
    pub fn send(&self) -> Result<T> {
        if Handle::try_current().is_ok() {
            return Err(Error::Runtime(
                "blocking send() inside an async runtime; use call().await".to_string(),
            ));
        }
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to start runtime: {}", e)))?;
        runtime.block_on((self.factory)())
    }

    /// Schedule on `pool` and return a handle to the result.
    pub fn send_async(&self, pool: &WorkerPool) -> PendingCall<T> {
        pool.spawn((self.factory)())
    }

    /// Run inline on the current async context.
    pub async fn call(&self) -> Result<T> {
        (self.factory)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (RemoteCall<usize>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let call = RemoteCall::new(move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });
        (call, runs)
    }

    #[test]
    fn test_nothing_runs_until_invoked() {
        let (_call, runs) = counting();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_send_runs_once_per_invocation() {
        let (call, runs) = counting();
        assert_eq!(call.send().unwrap(), 1);
        assert_eq!(call.send().unwrap(), 2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_send_async_on_pool() {
        let (call, runs) = counting();
        let pool = WorkerPool::new(2).unwrap();
        let pending = call.send_async(&pool);
        assert_eq!(pending.wait().unwrap(), 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_propagates() {
        let call: RemoteCall<()> = RemoteCall::failed(|| Error::Cancelled);
        assert!(matches!(call.send(), Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_send_inside_runtime_is_refused() {
        let (call, runs) = counting();
        assert!(matches!(call.send(), Err(Error::Runtime(_))));
        assert_eq!(call.call().await.unwrap(), 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
