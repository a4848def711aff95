//! Host services the upload controller runs on: the timer runtime and the
//! system clipboard.

pub mod clipboard;
pub mod runtime;
