use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{runtime::Handle, task::AbortHandle};

/// Abortable handles for every timer task a controller started.
#[derive(Debug, Clone)]
pub struct TimerSet {
    runtime: Handle,
    handles: Arc<Mutex<Vec<AbortHandle>>>,
}

impl TimerSet {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            handles: Arc::default(),
        }
    }

    /// Runs `f` once after `delay`.
    pub fn after(&self, delay: Duration, f: impl FnOnce() + Send + 'static) -> AbortHandle {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        })
    }

    pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) -> AbortHandle {
        let handle = self.runtime.spawn(task).abort_handle();
        let mut handles = self
            .handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.push(handle.clone());
        handle
    }

    pub fn pending(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Aborts every timer still pending and returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<AbortHandle> = self
            .handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect();
        let mut cancelled = 0;
        for handle in drained {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        cancelled
    }
}
