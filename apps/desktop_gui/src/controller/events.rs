//! Translation of egui input into upload controller events.

use std::{fs, io, path::Path};

use eframe::egui;
use shared::domain::SelectedFile;
use upload_core::{
    drag_drop::{DragEvent, DragTarget},
    UiEvent,
};

/// MIME type guessed from the file extension; empty when unknown, the same
/// way a browser reports files it cannot classify.
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}

pub fn selected_file_from_path(path: &Path) -> io::Result<SelectedFile> {
    let metadata = fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, metadata.len(), mime_for_path(path)))
}

/// Dropped files arrive either as a path (native) or as in-memory bytes
/// (web). Files that are neither are skipped.
pub fn selected_file_from_dropped(file: &egui::DroppedFile) -> Option<SelectedFile> {
    if let Some(path) = &file.path {
        let mut selected = match selected_file_from_path(path) {
            Ok(selected) => selected,
            Err(err) => {
                tracing::warn!(path = %path.display(), "unreadable dropped file: {err}");
                return None;
            }
        };
        if !file.mime.is_empty() {
            selected.mime_type = file.mime.clone();
        }
        return Some(selected);
    }

    let bytes = file.bytes.as_ref()?;
    let mime_type = if file.mime.is_empty() {
        mime_for_path(Path::new(&file.name))
    } else {
        file.mime.clone()
    };
    Some(SelectedFile::new(
        file.name.clone(),
        bytes.len() as u64,
        mime_type,
    ))
}

/// egui only reports whether files hover the window; this turns the per-frame
/// samples into enter/over/leave/drop transitions for whichever target the
/// pointer is over.
#[derive(Debug, Default)]
pub struct DragTracker {
    hovering: Option<DragTarget>,
}

impl DragTracker {
    pub fn is_hovering(&self) -> bool {
        self.hovering.is_some()
    }

    /// `dropped` is `Some` on the frame the files were released, even when
    /// none of them could be read.
    pub fn sample(
        &mut self,
        files_hovering: bool,
        dropped: Option<Vec<SelectedFile>>,
        target: DragTarget,
    ) -> Vec<UiEvent> {
        let mut events = Vec::new();

        if let Some(files) = dropped {
            if let Some(previous) = self.hovering.take() {
                if previous != target {
                    events.push(drag(previous, DragEvent::Leave));
                }
            }
            events.push(drag(target, DragEvent::Drop { files }));
            return events;
        }

        match (self.hovering, files_hovering) {
            (None, true) => {
                events.push(drag(target, DragEvent::Enter));
                self.hovering = Some(target);
            }
            (Some(previous), true) if previous != target => {
                events.push(drag(previous, DragEvent::Leave));
                events.push(drag(target, DragEvent::Enter));
                self.hovering = Some(target);
            }
            (Some(_), true) => events.push(drag(target, DragEvent::Over)),
            (Some(previous), false) => {
                events.push(drag(previous, DragEvent::Leave));
                self.hovering = None;
            }
            (None, false) => {}
        }
        events
    }
}

fn drag(target: DragTarget, event: DragEvent) -> UiEvent {
    UiEvent::Drag { target, event }
}
