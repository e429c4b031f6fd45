//! Worker pool and pending-call handles.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::config::schema::RuntimeConfig;
use crate::error::{Error, Result};

/// A bounded multi-thread runtime that runs non-blocking calls.
#[derive(Debug)]
pub struct WorkerPool {
    runtime: Option<Runtime>,
    handle: Handle,
}

impl WorkerPool {
    pub fn new(worker_threads: usize) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("appchain-worker")
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to start worker pool: {}", e)))?;
        let handle = runtime.handle().clone();

        tracing::debug!(worker_threads = worker_threads, "Worker pool started");
        Ok(Self {
            runtime: Some(runtime),
            handle,
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        Self::new(config.worker_threads)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub(crate) fn spawn<T, F>(&self, future: F) -> PendingCall<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        PendingCall {
            handle: self.handle.spawn(future),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // A blocking shutdown would panic when dropped inside async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Handle to a call scheduled on a [`WorkerPool`].
///
/// Await it, block on it with [`PendingCall::wait`], or cancel it. Cancelling
/// stops local work such as receipt polling; a transaction already broadcast
/// stays broadcast.
#[derive(Debug)]
pub struct PendingCall<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T> PendingCall<T> {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Block the current thread until the call completes.
    ///
    /// Do not call this from inside an async task; await the handle instead.
    pub fn wait(self) -> Result<T> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => Err(Error::Runtime(format!("worker task failed: {}", e))),
        })
    }
}
