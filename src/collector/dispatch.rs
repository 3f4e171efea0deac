use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Semaphore;
use tracing::{error, warn};

const FALLBACK_WORKER_THREADS: usize = 2;

/// Process-wide runtime for callers outside any Tokio context. Never shut
/// down, so sends outlive the collector that started them.
static FALLBACK_RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();

fn fallback_handle() -> Option<Handle> {
    FALLBACK_RUNTIME
        .get_or_init(|| {
            Builder::new_multi_thread()
                .worker_threads(FALLBACK_WORKER_THREADS)
                .thread_name("pushlogs-dispatch")
                .enable_all()
                .build()
                .map_err(|e| error!("pushlogs: failed to start dispatch runtime: {e}"))
                .ok()
        })
        .as_ref()
        .map(|runtime| runtime.handle().clone())
}

/// Runs send tasks without ever blocking the submitting thread.
///
/// Tasks go to the caller's Tokio runtime when there is one, otherwise to a
/// shared runtime created on first use. With a limit set, each task waits for
/// a permit inside itself.
#[derive(Clone)]
pub struct Dispatcher {
    limiter: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    pub fn new(max_in_flight: Option<usize>) -> Self {
        Self {
            limiter: max_in_flight.map(|limit| Arc::new(Semaphore::new(limit))),
        }
    }

    /// Runtime a task submitted from here would run on: the caller's, or the
    /// shared fallback. `None` only when the fallback could not be built.
    pub fn handle(&self) -> Option<Handle> {
        Handle::try_current().ok().or_else(fallback_handle)
    }

    /// Submits a task and returns immediately. Returns `false` when no
    /// runtime could be found or built, in which case the task is dropped.
    pub fn spawn<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Some(handle) = self.handle() else {
            return false;
        };
        self.spawn_on(&handle, task);
        true
    }

    pub fn spawn_on<F>(&self, handle: &Handle, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match &self.limiter {
            Some(limiter) => {
                let limiter = Arc::clone(limiter);
                handle.spawn(async move {
                    let Ok(_permit) = limiter.acquire_owned().await else {
                        warn!("send limiter closed, dropping log");
                        return;
                    };
                    task.await;
                });
            }
            None => {
                handle.spawn(task);
            }
        }
    }

    /// Permits currently free, or `None` when unbounded.
    pub fn available_permits(&self) -> Option<usize> {
        self.limiter.as_ref().map(|limiter| limiter.available_permits())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("available_permits", &self.available_permits())
            .field("fallback_started", &FALLBACK_RUNTIME.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot};

    #[tokio::test]
    async fn test_spawn_runs_on_current_runtime() {
        let dispatcher = Dispatcher::new(None);
        let (tx, rx) = oneshot::channel();

        assert!(dispatcher.spawn(async move {
            let _ = tx.send(7);
        }));

        assert_eq!(rx.await.unwrap(), 7);
        assert_eq!(dispatcher.available_permits(), None);
    }

    #[test]
    fn test_spawn_outside_runtime_uses_fallback() {
        let dispatcher = Dispatcher::new(None);
        let (tx, rx) = std::sync::mpsc::channel();

        assert!(dispatcher.spawn(async move {
            let _ = tx.send(std::thread::current().name().map(str::to_string));
        }));

        let thread_name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(thread_name.as_deref(), Some("pushlogs-dispatch"));
    }

    #[test]
    fn test_fallback_task_outlives_its_dispatcher() {
        let dispatcher = Dispatcher::new(Some(1));
        let (tx, rx) = std::sync::mpsc::channel();

        assert!(dispatcher.spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = tx.send("finished");
        }));
        drop(dispatcher);

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("finished"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_limit_caps_concurrent_tasks() {
        let dispatcher = Dispatcher::new(Some(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        for _ in 0..8 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            let done_tx = done_tx.clone();
            dispatcher.spawn(async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                let _ = done_tx.send(());
            });
        }

        for _ in 0..8 {
            done_rx.recv().await.unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
