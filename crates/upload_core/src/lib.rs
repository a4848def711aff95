//! Upload form interaction: file validation, drag-and-drop, notification
//! widgets and a simulated submission progress bar, driven by a single
//! [`UploadController`] per page session.

pub mod clipboard;
pub mod config;
mod controller;
pub mod drag_drop;
pub mod format;
pub mod listeners;
pub mod notifier;
pub mod page;
pub mod presenter;
pub mod progress;
pub mod timers;
pub mod validation;

pub use clipboard::{ClipboardSink, UnavailableClipboard};
pub use config::{load_settings, UiSettings};
pub use controller::{
    location_path, EventOutcome, SelectionOutcome, SubmitOutcome, UiEvent, UploadController,
};
pub use format::format_file_size;
pub use notifier::Notifier;
pub use page::{Page, PageModel};
pub use validation::{validate, UploadPolicy};
