use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::{AlertId, NotificationKind, SelectedFile, ToastId};

use crate::{
    format::format_file_size,
    page::{
        AlertNode, ContainerNode, FileInfoNode, FilePreviewNode, FileSlotNode, Page, ToastNode,
    },
};

pub const PROCESSING_MESSAGE: &str = "Processing video... This may take a few minutes.";

/// Writes widgets into the page. Every call is a remove-then-insert on a
/// single category of node.
#[derive(Debug, Clone)]
pub struct Presenter {
    page: Page,
    next_id: Arc<AtomicU64>,
}

impl Presenter {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Inserts the banner right after the container's first child.
    pub fn insert_alert(&self, message: &str, kind: NotificationKind) -> AlertId {
        let id = AlertId(self.allocate_id());
        let node = ContainerNode::Alert(AlertNode {
            id,
            kind,
            message: message.to_string(),
        });
        self.page.update(|model| {
            let index = model.container.len().min(1);
            model.container.insert(index, node);
        });
        id
    }

    pub fn remove_alert(&self, id: AlertId) -> bool {
        self.page.update(|model| {
            let before = model.container.len();
            model
                .container
                .retain(|node| !matches!(node, ContainerNode::Alert(alert) if alert.id == id));
            model.container.len() != before
        })
    }

    pub fn insert_toast(&self, message: &str, kind: NotificationKind) -> ToastId {
        let id = ToastId(self.allocate_id());
        self.page.update(|model| {
            model.toast_container.get_or_insert_with(Vec::new).push(ToastNode {
                id,
                kind,
                message: message.to_string(),
                visible: true,
            });
        });
        id
    }

    /// Starts the hide transition; the toast stays in the container until
    /// [`Presenter::remove_toast`].
    pub fn hide_toast(&self, id: ToastId) -> bool {
        self.page.update(|model| {
            let Some(toasts) = model.toast_container.as_mut() else {
                return false;
            };
            match toasts.iter_mut().find(|toast| toast.id == id) {
                Some(toast) if toast.visible => {
                    toast.visible = false;
                    true
                }
                _ => false,
            }
        })
    }

    pub fn remove_toast(&self, id: ToastId) -> bool {
        self.page.update(|model| {
            let Some(toasts) = model.toast_container.as_mut() else {
                return false;
            };
            let before = toasts.len();
            toasts.retain(|toast| toast.id != id);
            toasts.len() != before
        })
    }

    pub fn update_file_info(&self, file: &SelectedFile) {
        let node = FileSlotNode::Info(FileInfoNode {
            name: file.name.clone(),
            size_label: format_file_size(file.size_bytes),
        });
        self.page.update(|model| {
            model
                .file_slot
                .retain(|node| !matches!(node, FileSlotNode::Info(_)));
            model.file_slot.push(node);
        });
    }

    pub fn show_file_preview(&self, file: &SelectedFile) {
        let node = FileSlotNode::Preview(FilePreviewNode {
            name: file.name.clone(),
            size_label: format_file_size(file.size_bytes),
            mime_type: file.mime_type.clone(),
        });
        self.page.update(|model| {
            model
                .file_slot
                .retain(|node| !matches!(node, FileSlotNode::Preview(_)));
            model.file_slot.push(node);
        });
    }

    pub fn clear_file_details(&self) {
        self.page.update(|model| model.file_slot.clear());
    }

    /// Puts the processing banner at the top of the container, once.
    pub fn insert_processing_banner(&self) -> bool {
        self.page.update(|model| {
            if model
                .container
                .iter()
                .any(|node| matches!(node, ContainerNode::ProcessingBanner { .. }))
            {
                return false;
            }
            model.container.insert(
                0,
                ContainerNode::ProcessingBanner {
                    message: PROCESSING_MESSAGE.to_string(),
                },
            );
            true
        })
    }
}
