use std::sync::Arc;

use shared::{
    domain::{AlertId, NotificationKind, SelectedFile, ToastId},
    error::ValidationError,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    clipboard::ClipboardSink,
    config::UiSettings,
    drag_drop::{DragDisposition, DragEvent, DragEventKind, DragTarget, DropZone, DropZoneState},
    listeners::{Listener, ListenerSet},
    notifier::Notifier,
    page::{DropZoneStyle, Page},
    presenter::Presenter,
    progress::{ProgressSimulator, StepSource},
    timers::TimerSet,
    validation::UploadPolicy,
};

/// Input the host forwards from its widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FileInputChanged(Vec<SelectedFile>),
    Drag { target: DragTarget, event: DragEvent },
    SubmitRequested,
    AlertDismissed(AlertId),
    ToastDismissed(ToastId),
    ToastHidden(ToastId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Empty,
    Accepted(SelectedFile),
    Rejected(ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The host should now perform its own submission of `file`.
    Started { file: Option<SelectedFile> },
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    NotListening,
    Handled,
    Selection(SelectionOutcome),
    Drag(DragDisposition),
    Submit(SubmitOutcome),
}

/// Path component of a page location given either as a full URL or as a
/// bare path.
pub fn location_path(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Upload form controller for one page session. Owns the timers, the
/// drop-zone state and the registered listeners; [`UploadController::dispose`]
/// tears all of them down.
pub struct UploadController {
    page: Page,
    settings: UiSettings,
    policy: UploadPolicy,
    presenter: Presenter,
    notifier: Notifier,
    timers: TimerSet,
    drop_zone: DropZone,
    progress: ProgressSimulator,
    listeners: ListenerSet,
    disposed: bool,
}

impl UploadController {
    pub fn new(
        page: Page,
        settings: UiSettings,
        runtime: Handle,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        let settings = match settings.check() {
            Ok(()) => settings,
            Err(err) => {
                warn!("invalid upload settings, using defaults: {err}");
                UiSettings::default()
            }
        };
        let timers = TimerSet::new(runtime);
        let presenter = Presenter::new(page.clone());
        let notifier = Notifier::new(presenter.clone(), timers.clone(), clipboard, &settings);
        let progress = ProgressSimulator::new(page.clone(), timers.clone(), &settings);
        Self {
            policy: UploadPolicy::from(&settings),
            page,
            settings,
            presenter,
            notifier,
            timers,
            drop_zone: DropZone::default(),
            progress,
            listeners: ListenerSet::default(),
            disposed: false,
        }
    }

    pub fn with_step_source(mut self, steps: Box<dyn StepSource>) -> Self {
        self.progress.set_step_source(steps);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn drop_zone_state(&self) -> DropZoneState {
        self.drop_zone.state()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.is_active(listener)
    }

    /// Registers the form's handlers and inspects the page location. Drag
    /// listeners are only registered when the page has a drop zone.
    pub fn init(&mut self, location: &str) {
        if self.disposed || !self.listeners.is_empty() {
            return;
        }

        self.listeners.register(Listener::FileInputChange);
        self.listeners.register(Listener::FormSubmit);
        if self.page.read(|model| model.drop_zone.is_some()) {
            for kind in DragEventKind::ALL {
                self.listeners
                    .register(Listener::Drag(DragTarget::DropZone, kind));
                self.listeners.register(Listener::Drag(DragTarget::Body, kind));
            }
        }
        debug!(listeners = self.listeners.len(), "upload form listeners registered");

        let path = location_path(location);
        if path.contains(&self.settings.processing_path_marker) {
            info!(path = %path, "processing page detected");
            self.presenter.insert_processing_banner();
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> EventOutcome {
        if self.disposed {
            return EventOutcome::NotListening;
        }

        match event {
            UiEvent::FileInputChanged(files) => {
                if !self.listeners.is_active(Listener::FileInputChange) {
                    return EventOutcome::NotListening;
                }
                EventOutcome::Selection(self.select_files(files))
            }
            UiEvent::Drag { target, event } => {
                if !self.listeners.is_active(Listener::Drag(target, event.kind())) {
                    return EventOutcome::NotListening;
                }
                EventOutcome::Drag(self.handle_drag(target, event))
            }
            UiEvent::SubmitRequested => {
                if !self.listeners.is_active(Listener::FormSubmit) {
                    return EventOutcome::NotListening;
                }
                EventOutcome::Submit(self.submit())
            }
            UiEvent::AlertDismissed(id) => {
                self.notifier.dismiss_alert(id);
                EventOutcome::Handled
            }
            UiEvent::ToastDismissed(id) => {
                self.notifier.dismiss_toast(id);
                EventOutcome::Handled
            }
            UiEvent::ToastHidden(id) => {
                self.notifier.toast_hidden(id);
                EventOutcome::Handled
            }
        }
    }

    /// Makes `files` the active selection and previews the first one if it
    /// passes validation; otherwise only an error alert is shown.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> SelectionOutcome {
        let first = files.first().cloned();
        self.page.update(|model| model.selection = files);

        let Some(file) = first else {
            self.presenter.clear_file_details();
            return SelectionOutcome::Empty;
        };

        match self.policy.validate(&file) {
            Ok(()) => {
                info!(
                    name = %file.name,
                    size_bytes = file.size_bytes,
                    mime_type = %file.mime_type,
                    "video file accepted"
                );
                self.presenter.update_file_info(&file);
                self.presenter.show_file_preview(&file);
                SelectionOutcome::Accepted(file)
            }
            Err(err) => {
                warn!(
                    name = %file.name,
                    size_bytes = file.size_bytes,
                    mime_type = %file.mime_type,
                    "video file rejected: {err}"
                );
                self.presenter.clear_file_details();
                self.notifier
                    .show_alert(&err.to_string(), NotificationKind::Error);
                SelectionOutcome::Rejected(err)
            }
        }
    }

    fn handle_drag(&mut self, target: DragTarget, event: DragEvent) -> DragDisposition {
        let outcome = self.drop_zone.handle(target, event);
        if target == DragTarget::DropZone {
            let style = match outcome.state {
                DropZoneState::Hover => DropZoneStyle::DragActive,
                DropZoneState::Idle => DropZoneStyle::Idle,
            };
            let changed = self.page.read(|model| model.drop_zone != Some(style));
            if changed {
                self.page.update(|model| model.drop_zone = Some(style));
            }
        }
        if let Some(files) = outcome.dropped {
            debug!(count = files.len(), "files dropped on drop zone");
            self.select_files(files);
        }
        outcome.disposition
    }

    /// Locks the submit control and starts the progress animation. The host
    /// performs the real submission.
    pub fn submit(&mut self) -> SubmitOutcome {
        let already_disabled = self.page.read(|model| model.submit_button.disabled);
        if already_disabled || self.progress.is_started() {
            debug!("ignoring duplicate submission");
            return SubmitOutcome::AlreadySubmitting;
        }

        let busy_label = self.settings.submit_busy_label.clone();
        self.page.update(|model| {
            model.submit_button.disabled = true;
            model.submit_button.spinner = true;
            model.submit_button.label = busy_label;
        });
        self.progress.start();

        let file = self.page.read(|model| model.active_file().cloned());
        match &file {
            Some(file) => info!(name = %file.name, "upload form submitted"),
            None => info!("upload form submitted without a selected file"),
        }
        SubmitOutcome::Started { file }
    }

    /// Removes every listener and aborts pending timers. Returns the number of
    /// timers cancelled; later calls are no-ops.
    pub fn dispose(&mut self) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;
        let listeners = self.listeners.clear();
        let cancelled = self.timers.cancel_all();
        self.progress.stop();
        debug!(listeners, timers = cancelled, "upload controller disposed");
        cancelled
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
