use super::*;
use std::{collections::VecDeque, time::Duration};

use crate::{
    clipboard::UnavailableClipboard,
    page::{ContainerNode, PageModel},
    presenter::PROCESSING_MESSAGE,
};

const MIB: u64 = 1024 * 1024;

struct ScriptedSteps(VecDeque<f64>);

impl StepSource for ScriptedSteps {
    fn next_step(&mut self, _max_step: f64) -> f64 {
        self.0.pop_front().unwrap_or(5.0)
    }
}

fn controller_with(model: PageModel) -> UploadController {
    let page = Page::new(model);
    let mut controller = UploadController::new(
        page,
        UiSettings::default(),
        Handle::current(),
        Arc::new(UnavailableClipboard),
    );
    controller.init("/");
    controller
}

fn controller() -> UploadController {
    controller_with(PageModel::upload_form("Crowd Density Detection"))
}

fn mp4(size_bytes: u64) -> SelectedFile {
    SelectedFile::new("crowd.mp4", size_bytes, "video/mp4")
}

#[tokio::test]
async fn valid_selection_renders_info_and_preview_without_alert() {
    let mut controller = controller();

    let outcome = controller.handle(UiEvent::FileInputChanged(vec![mp4(10 * MIB)]));

    assert_eq!(outcome, EventOutcome::Selection(SelectionOutcome::Accepted(mp4(10 * MIB))));
    let model = controller.page().snapshot();
    assert_eq!(model.alerts().count(), 0);
    assert_eq!(model.file_slot.len(), 2);
    assert_eq!(model.file_info().expect("info").size_label, "10 MB");
    let preview = model.file_preview().expect("preview");
    assert_eq!(preview.size_label, "10 MB");
    assert_eq!(preview.mime_type, "video/mp4");
}

#[tokio::test]
async fn oversize_selection_alerts_and_renders_no_preview() {
    let mut controller = controller();

    let outcome = controller.handle(UiEvent::FileInputChanged(vec![mp4(60 * MIB)]));

    assert!(matches!(
        outcome,
        EventOutcome::Selection(SelectionOutcome::Rejected(ValidationError::FileTooLarge { .. }))
    ));
    let model = controller.page().snapshot();
    let alerts: Vec<_> = model.alerts().collect();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("50MB limit"));
    assert!(alerts[0].kind.is_error());
    assert!(model.file_slot.is_empty());
    assert_eq!(model.active_file(), Some(&mp4(60 * MIB)));
}

#[tokio::test]
async fn rejected_selection_clears_preview_of_previous_file() {
    let mut controller = controller();
    controller.select_files(vec![mp4(MIB)]);
    controller.select_files(vec![SelectedFile::new("notes.txt", 10, "text/plain")]);

    let model = controller.page().snapshot();
    assert!(model.file_info().is_none());
    assert!(model.file_preview().is_none());
    assert!(model.alerts().any(|a| a.message.starts_with("Unsupported file format")));
}

#[tokio::test]
async fn cancelled_picker_clears_selection() {
    let mut controller = controller();
    controller.select_files(vec![mp4(MIB)]);
    assert_eq!(controller.select_files(Vec::new()), SelectionOutcome::Empty);
    let model = controller.page().snapshot();
    assert!(model.selection.is_empty());
    assert!(model.file_slot.is_empty());
}

#[tokio::test]
async fn drop_on_hovered_zone_matches_manual_selection() {
    let mut dropped = controller();
    let mut picked = controller();

    let zone = DragTarget::DropZone;
    dropped.handle(UiEvent::Drag { target: zone, event: DragEvent::Enter });
    assert_eq!(dropped.drop_zone_state(), DropZoneState::Hover);
    assert_eq!(
        dropped.page().snapshot().drop_zone,
        Some(DropZoneStyle::DragActive)
    );

    let outcome = dropped.handle(UiEvent::Drag {
        target: zone,
        event: DragEvent::Drop {
            files: vec![mp4(10 * MIB), mp4(MIB)],
        },
    });
    picked.handle(UiEvent::FileInputChanged(vec![mp4(10 * MIB), mp4(MIB)]));

    assert_eq!(outcome, EventOutcome::Drag(DragDisposition::SWALLOW));
    assert_eq!(dropped.drop_zone_state(), DropZoneState::Idle);
    let dropped_model = dropped.page().snapshot();
    let picked_model = picked.page().snapshot();
    assert_eq!(dropped_model.drop_zone, Some(DropZoneStyle::Idle));
    assert_eq!(dropped_model.selection, picked_model.selection);
    assert_eq!(dropped_model.file_slot, picked_model.file_slot);
}

#[tokio::test]
async fn invalid_drop_only_alerts() {
    let mut controller = controller();
    controller.handle(UiEvent::Drag {
        target: DragTarget::DropZone,
        event: DragEvent::Drop {
            files: vec![SelectedFile::new("clip.webm", MIB, "video/webm")],
        },
    });

    let model = controller.page().snapshot();
    assert_eq!(model.alerts().count(), 1);
    assert!(model.file_slot.is_empty());
}

#[tokio::test]
async fn body_drag_events_are_swallowed_without_side_effects() {
    let mut controller = controller();
    let outcome = controller.handle(UiEvent::Drag {
        target: DragTarget::Body,
        event: DragEvent::Drop { files: vec![mp4(MIB)] },
    });

    assert_eq!(outcome, EventOutcome::Drag(DragDisposition::SWALLOW));
    let model = controller.page().snapshot();
    assert!(model.selection.is_empty());
    assert_eq!(model.drop_zone, Some(DropZoneStyle::Idle));
}

#[tokio::test]
async fn page_without_drop_zone_registers_no_drag_listeners() {
    let mut controller = controller_with(PageModel {
        drop_zone: None,
        ..PageModel::upload_form("Upload")
    });

    assert!(!controller.is_listening(Listener::Drag(DragTarget::Body, DragEventKind::Drop)));
    let outcome = controller.handle(UiEvent::Drag {
        target: DragTarget::DropZone,
        event: DragEvent::Enter,
    });
    assert_eq!(outcome, EventOutcome::NotListening);
    assert!(controller.is_listening(Listener::FormSubmit));
}

#[tokio::test]
async fn processing_location_inserts_banner_at_top() {
    let page = Page::new(PageModel::upload_form("Results"));
    let mut controller = UploadController::new(
        page,
        UiSettings::default(),
        Handle::current(),
        Arc::new(UnavailableClipboard),
    );
    controller.init("http://localhost:5000/process/abc123?tab=heatmap");

    let model = controller.page().snapshot();
    assert_eq!(model.processing_banner(), Some(PROCESSING_MESSAGE));
    assert!(matches!(model.container[0], ContainerNode::ProcessingBanner { .. }));
    assert!(matches!(model.container[1], ContainerNode::Static(_)));
}

#[tokio::test]
async fn other_locations_leave_container_untouched() {
    let controller = controller();
    assert!(controller.page().snapshot().processing_banner().is_none());
}

#[test]
fn location_path_accepts_urls_and_bare_paths() {
    assert_eq!(location_path("https://example.test/process/42#top"), "/process/42");
    assert_eq!(location_path("/process/42?x=1"), "/process/42");
    assert_eq!(location_path("/"), "/");
}

#[tokio::test(start_paused = true)]
async fn submit_locks_button_and_progress_halts_at_ceiling() {
    let page = Page::new(PageModel::upload_form("Upload"));
    let mut controller = UploadController::new(
        page.clone(),
        UiSettings::default(),
        Handle::current(),
        Arc::new(UnavailableClipboard),
    )
    .with_step_source(Box::new(ScriptedSteps(VecDeque::from(vec![
        9.0, 9.5, 0.0, 9.99,
    ]))));
    controller.init("/");
    controller.select_files(vec![mp4(MIB)]);

    let outcome = controller.handle(UiEvent::SubmitRequested);
    assert_eq!(
        outcome,
        EventOutcome::Submit(SubmitOutcome::Started {
            file: Some(mp4(MIB))
        })
    );
    let model = page.snapshot();
    assert!(model.submit_button.disabled);
    assert!(model.submit_button.spinner);
    assert_eq!(model.submit_button.label, "Starting…");
    assert!(model.progress.visible);

    assert_eq!(
        controller.handle(UiEvent::SubmitRequested),
        EventOutcome::Submit(SubmitOutcome::AlreadySubmitting)
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mut last = 0.0;
    for _ in 0..40 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let percent = page.snapshot().progress.percent;
        assert!(percent >= last, "progress went backwards: {last} -> {percent}");
        assert!(percent - last < 10.0);
        last = percent;
    }

    let model = page.snapshot();
    assert_eq!(model.progress.percent, 90.0);
    assert!(model.progress.striped);
}

#[tokio::test(start_paused = true)]
async fn two_alerts_coexist_and_expire_independently() {
    let mut controller = controller();
    controller.select_files(vec![mp4(60 * MIB)]);
    tokio::time::sleep(Duration::from_millis(2500)).await;
    controller.select_files(vec![mp4(70 * MIB)]);

    assert_eq!(controller.page().snapshot().alerts().count(), 2);
    tokio::time::sleep(Duration::from_millis(2501)).await;
    assert_eq!(controller.page().snapshot().alerts().count(), 1);
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(controller.page().snapshot().alerts().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn dispose_cancels_timers_and_ignores_later_events() {
    let mut controller = controller();
    controller.select_files(vec![mp4(60 * MIB)]);
    controller.handle(UiEvent::SubmitRequested);
    tokio::task::yield_now().await;
    assert_eq!(controller.pending_timers(), 2);

    assert_eq!(controller.dispose(), 2);
    assert_eq!(controller.dispose(), 0);
    assert!(!controller.is_listening(Listener::FileInputChange));

    let percent_at_dispose = controller.page().snapshot().progress.percent;
    tokio::time::sleep(Duration::from_secs(10)).await;
    let model = controller.page().snapshot();
    assert_eq!(model.progress.percent, percent_at_dispose);
    assert_eq!(model.alerts().count(), 1);
    assert_eq!(
        controller.handle(UiEvent::FileInputChanged(vec![mp4(MIB)])),
        EventOutcome::NotListening
    );
}

#[tokio::test]
async fn dismissing_an_alert_removes_it_immediately() {
    let mut controller = controller();
    controller.select_files(vec![mp4(60 * MIB)]);
    let id = controller
        .page()
        .snapshot()
        .alerts()
        .next()
        .expect("alert")
        .id;

    assert_eq!(controller.handle(UiEvent::AlertDismissed(id)), EventOutcome::Handled);
    assert_eq!(controller.page().snapshot().alerts().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn invalid_settings_fall_back_to_defaults_and_progress_still_halts() {
    let page = Page::new(PageModel::upload_form("Upload"));
    let mut controller = UploadController::new(
        page.clone(),
        UiSettings {
            progress_max_step: f64::INFINITY,
            progress_tick_ms: 0,
            ..UiSettings::default()
        },
        Handle::current(),
        Arc::new(UnavailableClipboard),
    );
    assert_eq!(controller.settings(), &UiSettings::default());
    controller.init("/");

    controller.handle(UiEvent::SubmitRequested);
    tokio::time::sleep(Duration::from_secs(120)).await;

    let model = page.snapshot();
    assert_eq!(model.progress.percent, 90.0);
    assert!(model.progress.striped);
}
