//! Retained model of the upload page. Hosts render a [`PageModel`] snapshot;
//! the controller and its timers mutate it through a shared [`Page`] handle.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use shared::domain::{AlertId, NotificationKind, SelectedFile, ToastId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNode {
    pub id: AlertId,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerNode {
    /// Markup that was on the page before the controller started.
    Static(String),
    Alert(AlertNode),
    ProcessingBanner { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfoNode {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreviewNode {
    pub name: String,
    pub size_label: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSlotNode {
    Info(FileInfoNode),
    Preview(FilePreviewNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastNode {
    pub id: ToastId,
    pub kind: NotificationKind,
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropZoneStyle {
    #[default]
    Idle,
    DragActive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub spinner: bool,
    pub label: String,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            disabled: false,
            spinner: false,
            label: "Upload & Analyze".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBarView {
    pub visible: bool,
    pub percent: f64,
    pub striped: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageModel {
    pub container: Vec<ContainerNode>,
    /// Nodes appended next to the file input.
    pub file_slot: Vec<FileSlotNode>,
    /// Created on the first toast.
    pub toast_container: Option<Vec<ToastNode>>,
    /// `None` when the page has no drop zone.
    pub drop_zone: Option<DropZoneStyle>,
    pub selection: Vec<SelectedFile>,
    pub submit_button: SubmitButton,
    pub progress: ProgressBarView,
}

impl PageModel {
    /// The upload form layout: a heading as the container's first child and a
    /// drop zone around the file input.
    pub fn upload_form(heading: impl Into<String>) -> Self {
        Self {
            container: vec![ContainerNode::Static(heading.into())],
            drop_zone: Some(DropZoneStyle::Idle),
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> impl Iterator<Item = &AlertNode> {
        self.container.iter().filter_map(|node| match node {
            ContainerNode::Alert(alert) => Some(alert),
            _ => None,
        })
    }

    pub fn processing_banner(&self) -> Option<&str> {
        self.container.iter().find_map(|node| match node {
            ContainerNode::ProcessingBanner { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn file_info(&self) -> Option<&FileInfoNode> {
        self.file_slot.iter().find_map(|node| match node {
            FileSlotNode::Info(info) => Some(info),
            _ => None,
        })
    }

    pub fn file_preview(&self) -> Option<&FilePreviewNode> {
        self.file_slot.iter().find_map(|node| match node {
            FileSlotNode::Preview(preview) => Some(preview),
            _ => None,
        })
    }

    pub fn toasts(&self) -> &[ToastNode] {
        self.toast_container.as_deref().unwrap_or(&[])
    }

    pub fn active_file(&self) -> Option<&SelectedFile> {
        self.selection.first()
    }
}

type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Shared handle to the page model.
#[derive(Clone, Default)]
pub struct Page {
    model: Arc<Mutex<PageModel>>,
    on_change: Arc<Mutex<Option<ChangeListener>>>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("model", &*self.lock_model())
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn new(model: PageModel) -> Self {
        Self {
            model: Arc::new(Mutex::new(model)),
            on_change: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> PageModel {
        self.lock_model().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&PageModel) -> R) -> R {
        f(&self.lock_model())
    }

    /// Applies a mutation, then notifies the change listener outside the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut PageModel) -> R) -> R {
        let result = f(&mut self.lock_model());
        let listener = self
            .on_change
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(listener) = listener {
            listener();
        }
        result
    }

    pub fn set_change_listener(&self, listener: impl Fn() + Send + Sync + 'static) {
        *self
            .on_change
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(listener));
    }

    pub fn clear_change_listener(&self) {
        *self
            .on_change
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn lock_model(&self) -> MutexGuard<'_, PageModel> {
        self.model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
