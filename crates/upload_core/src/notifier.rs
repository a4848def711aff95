use std::{sync::Arc, time::Duration};

use shared::{
    domain::{AlertId, NotificationKind, ToastId},
    error::UiError,
};
use tracing::{debug, info, warn};

use crate::{clipboard::ClipboardSink, config::UiSettings, presenter::Presenter, timers::TimerSet};

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy to clipboard";

/// Notification helpers shared with the rest of the application: alerts,
/// toasts and clipboard copies with toast feedback.
#[derive(Clone)]
pub struct Notifier {
    presenter: Presenter,
    timers: TimerSet,
    clipboard: Arc<dyn ClipboardSink>,
    alert_dismiss_after: Duration,
    toast_autohide_after: Duration,
    toast_transition: Duration,
}

impl Notifier {
    pub fn new(
        presenter: Presenter,
        timers: TimerSet,
        clipboard: Arc<dyn ClipboardSink>,
        settings: &UiSettings,
    ) -> Self {
        Self {
            presenter,
            timers,
            clipboard,
            alert_dismiss_after: settings.alert_dismiss_after(),
            toast_autohide_after: settings.toast_autohide_after(),
            toast_transition: settings.toast_transition(),
        }
    }

    /// Inserts a dismissible banner that removes itself after the configured
    /// delay unless the user closed it first.
    pub fn show_alert(&self, message: &str, kind: NotificationKind) -> AlertId {
        let id = self.presenter.insert_alert(message, kind);
        debug!(alert_id = id.0, kind = kind.style_class(), "alert shown");

        let presenter = self.presenter.clone();
        self.timers.after(self.alert_dismiss_after, move || {
            if presenter.remove_alert(id) {
                debug!(alert_id = id.0, "alert auto-dismissed");
            }
        });
        id
    }

    pub fn dismiss_alert(&self, id: AlertId) -> bool {
        self.presenter.remove_alert(id)
    }

    pub fn show_toast(&self, message: &str, kind: NotificationKind) -> ToastId {
        let id = self.presenter.insert_toast(message, kind);
        debug!(toast_id = id.0, kind = kind.style_class(), "toast shown");

        let presenter = self.presenter.clone();
        let autohide_after = self.toast_autohide_after;
        let transition = self.toast_transition;
        self.timers.spawn(async move {
            tokio::time::sleep(autohide_after).await;
            if presenter.hide_toast(id) {
                tokio::time::sleep(transition).await;
                presenter.remove_toast(id);
            }
        });
        id
    }

    /// User closed the toast: start hiding it. Removal follows on
    /// [`Notifier::toast_hidden`] or once the transition time has passed.
    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        if !self.presenter.hide_toast(id) {
            return false;
        }
        let presenter = self.presenter.clone();
        self.timers.after(self.toast_transition, move || {
            presenter.remove_toast(id);
        });
        true
    }

    /// The host finished the hide transition.
    pub fn toast_hidden(&self, id: ToastId) -> bool {
        self.presenter.remove_toast(id)
    }

    pub async fn copy_to_clipboard(&self, text: &str) -> Result<(), UiError> {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                info!(chars = text.chars().count(), "copied text to clipboard");
                self.show_toast(COPY_SUCCESS_MESSAGE, NotificationKind::Success);
                Ok(())
            }
            Err(err) => {
                warn!("clipboard write failed: {err:#}");
                self.show_toast(COPY_FAILURE_MESSAGE, NotificationKind::Error);
                Err(UiError::ClipboardWriteFailed {
                    reason: format!("{err:#}"),
                })
            }
        }
    }
}
