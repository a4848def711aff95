//! Forwarding of UI events into the upload controller and status reporting.

use upload_core::{EventOutcome, SelectionOutcome, SubmitOutcome, UiEvent, UploadController};

pub fn dispatch_ui_event(controller: &mut UploadController, event: UiEvent, status: &mut String) {
    let event_name = match &event {
        UiEvent::FileInputChanged(_) => "file_input_changed",
        UiEvent::Drag { .. } => "drag",
        UiEvent::SubmitRequested => "submit_requested",
        UiEvent::AlertDismissed(_) => "alert_dismissed",
        UiEvent::ToastDismissed(_) => "toast_dismissed",
        UiEvent::ToastHidden(_) => "toast_hidden",
    };

    match controller.handle(event) {
        EventOutcome::NotListening => {
            tracing::debug!(event = event_name, "upload controller is not listening");
        }
        EventOutcome::Handled | EventOutcome::Drag(_) => {}
        EventOutcome::Selection(SelectionOutcome::Empty) => {
            *status = "No file selected".to_string();
        }
        EventOutcome::Selection(SelectionOutcome::Accepted(file)) => {
            *status = format!("Ready to upload {}", file.name);
        }
        EventOutcome::Selection(SelectionOutcome::Rejected(err)) => {
            *status = err.to_string();
        }
        EventOutcome::Submit(SubmitOutcome::Started { file }) => {
            // The upload itself belongs to the server page; the desktop host
            // only reports the hand-off.
            match file {
                Some(file) => {
                    tracing::info!(
                        name = %file.name,
                        size_bytes = file.size_bytes,
                        "handing off upload"
                    );
                    *status = format!("Uploading {}", file.name);
                }
                None => {
                    tracing::info!("handing off upload without a file");
                    *status = "Uploading".to_string();
                }
            }
        }
        EventOutcome::Submit(SubmitOutcome::AlreadySubmitting) => {
            *status = "Upload already in progress".to_string();
        }
    }
}
