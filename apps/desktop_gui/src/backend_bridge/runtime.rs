//! Runtime that drives the controller's timers off the UI thread.

use tokio::runtime::{Builder, Runtime};

pub fn build_timer_runtime() -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("upload-timers")
        .enable_time()
        .build()
}
