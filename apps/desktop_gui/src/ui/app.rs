use std::{path::PathBuf, sync::Arc};

use eframe::egui;
use shared::domain::NotificationKind;
use tokio::runtime::Runtime;
use upload_core::{
    drag_drop::DragTarget,
    format_file_size,
    page::{ContainerNode, DropZoneStyle, FileSlotNode, ToastNode},
    validation::SUPPORTED_EXTENSIONS,
    Page, PageModel, UiEvent, UiSettings, UploadController,
};

use crate::{
    backend_bridge::clipboard::ArboardClipboard,
    controller::{
        events::{selected_file_from_dropped, selected_file_from_path, DragTracker},
        orchestration::dispatch_ui_event,
    },
};

const TOAST_FADE_SECONDS: f32 = 0.15;

pub struct StartupConfig {
    pub location: String,
    pub heading: String,
    pub settings: UiSettings,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            location: "/".to_string(),
            heading: "Crowd Density Detection".to_string(),
            settings: UiSettings::default(),
        }
    }
}

pub struct UploadFormApp {
    runtime: Runtime,
    controller: UploadController,
    drag: DragTracker,
    drop_zone_rect: Option<egui::Rect>,
    upload_dir: Option<PathBuf>,
    status: String,
}

impl UploadFormApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime, startup: StartupConfig) -> Self {
        let page = Page::new(PageModel::upload_form(startup.heading));
        let repaint = cc.egui_ctx.clone();
        page.set_change_listener(move || repaint.request_repaint());

        let mut controller = UploadController::new(
            page,
            startup.settings,
            runtime.handle().clone(),
            Arc::new(ArboardClipboard),
        );
        controller.init(&startup.location);

        Self {
            runtime,
            controller,
            drag: DragTracker::default(),
            drop_zone_rect: None,
            upload_dir: default_upload_dir(),
            status: "Choose a video to analyze".to_string(),
        }
    }

    fn forward(&mut self, event: UiEvent) {
        dispatch_ui_event(&mut self.controller, event, &mut self.status);
    }

    fn collect_drag_events(&mut self, ctx: &egui::Context) -> Vec<UiEvent> {
        let (files_hovering, dropped, pointer) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.pointer.latest_pos(),
            )
        });

        let target = match (self.drop_zone_rect, pointer) {
            (Some(rect), Some(pos)) if !rect.contains(pos) => DragTarget::Body,
            _ => DragTarget::DropZone,
        };
        let dropped = (!dropped.is_empty()).then(|| {
            dropped
                .iter()
                .filter_map(selected_file_from_dropped)
                .collect::<Vec<_>>()
        });
        self.drag.sample(files_hovering, dropped, target)
    }

    fn pick_file(&mut self) -> Option<UiEvent> {
        let mut dialog = rfd::FileDialog::new().add_filter("Video", SUPPORTED_EXTENSIONS);
        if let Some(dir) = &self.upload_dir {
            dialog = dialog.set_directory(dir);
        }

        let files = match dialog.pick_file() {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    self.upload_dir = Some(parent.to_path_buf());
                }
                match selected_file_from_path(&path) {
                    Ok(file) => vec![file],
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            "failed to read selected file: {err}"
                        );
                        self.status = format!("Could not read {}", path.display());
                        return None;
                    }
                }
            }
            None => Vec::new(),
        };
        Some(UiEvent::FileInputChanged(files))
    }

    fn copy_to_clipboard(&self, text: String) {
        let notifier = self.controller.notifier();
        self.runtime.spawn(async move {
            if let Err(err) = notifier.copy_to_clipboard(&text).await {
                tracing::debug!(code = ?err.code(), "copy request failed: {err}");
            }
        });
    }

    fn show_page(&mut self, ui: &mut egui::Ui, model: &PageModel, events: &mut Vec<UiEvent>) {
        let mut copy_request = None;

        for node in &model.container {
            match node {
                ContainerNode::Static(heading) => {
                    ui.heading(heading);
                    ui.add_space(8.0);
                }
                ContainerNode::ProcessingBanner { message } => {
                    notice_frame(ui, NotificationKind::Info, |ui| {
                        ui.horizontal(|ui| {
                            ui.add(egui::Spinner::new());
                            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                        });
                    });
                    ui.add_space(6.0);
                }
                ContainerNode::Alert(alert) => {
                    notice_frame(ui, alert.kind, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                egui::RichText::new(&alert.message).color(egui::Color32::WHITE),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✕").clicked() {
                                    events.push(UiEvent::AlertDismissed(alert.id));
                                }
                            });
                        });
                    });
                    ui.add_space(6.0);
                }
            }
        }

        let limit = format_file_size(self.controller.policy().max_file_size_bytes);
        let active = model.drop_zone == Some(DropZoneStyle::DragActive);
        let visuals = ui.visuals().clone();
        let stroke = if active {
            egui::Stroke::new(2.0, visuals.selection.stroke.color)
        } else {
            egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color)
        };
        let fill = if active {
            lighten_color(visuals.faint_bg_color, 0.08)
        } else {
            visuals.faint_bg_color
        };

        let mut choose_clicked = false;
        let zone = egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(20, 18))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Drag & drop a video here").strong());
                    ui.weak(format!("MP4, AVI, MOV, MKV, FLV or WMV up to {limit}"));
                    ui.add_space(6.0);
                    choose_clicked = ui.button("Choose video…").clicked();
                });

                for slot in &model.file_slot {
                    ui.add_space(8.0);
                    match slot {
                        FileSlotNode::Info(info) => {
                            ui.horizontal(|ui| {
                                ui.label(format!("🎞 {} ({})", info.name, info.size_label));
                                if ui.small_button("Copy name").clicked() {
                                    copy_request = Some(info.name.clone());
                                }
                            });
                        }
                        FileSlotNode::Preview(preview) => {
                            ui.group(|ui| {
                                ui.label(egui::RichText::new("File Selected:").strong());
                                ui.label(format!("Name: {}", preview.name));
                                ui.label(format!("Size: {}", preview.size_label));
                                ui.label(format!("Type: {}", preview.mime_type));
                            });
                        }
                    }
                }
            });
        self.drop_zone_rect = model.drop_zone.map(|_| zone.response.rect);

        if choose_clicked {
            events.extend(self.pick_file());
        }
        if let Some(text) = copy_request {
            self.copy_to_clipboard(text);
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if model.submit_button.spinner {
                ui.add(egui::Spinner::new());
            }
            let label = egui::RichText::new(&model.submit_button.label).strong();
            let button = egui::Button::new(label);
            if ui.add_enabled(!model.submit_button.disabled, button).clicked() {
                events.push(UiEvent::SubmitRequested);
            }
        });

        if model.progress.visible {
            ui.add_space(8.0);
            ui.add(
                egui::ProgressBar::new((model.progress.percent / 100.0) as f32)
                    .show_percentage()
                    .animate(model.progress.striped),
            );
        }
    }

    fn show_toasts(&self, ctx: &egui::Context, toasts: &[ToastNode], events: &mut Vec<UiEvent>) {
        if toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_container"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in toasts {
                    let opacity = ctx.animate_bool_with_time(
                        egui::Id::new(("toast", toast.id.0)),
                        toast.visible,
                        TOAST_FADE_SECONDS,
                    );
                    if !toast.visible && opacity <= 0.0 {
                        events.push(UiEvent::ToastHidden(toast.id));
                        continue;
                    }

                    ui.scope(|ui| {
                        ui.set_opacity(opacity);
                        notice_frame(ui, toast.kind, |ui| {
                            ui.set_max_width(320.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&toast.message)
                                        .color(egui::Color32::WHITE),
                                );
                                if ui.small_button("✕").clicked() {
                                    events.push(UiEvent::ToastDismissed(toast.id));
                                }
                            });
                        });
                    });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for UploadFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = self.collect_drag_events(ctx);
        let model = self.controller.page().snapshot();

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_page(ui, &model, &mut events);
            });
        });
        self.show_toasts(ctx, model.toasts(), &mut events);

        for event in events {
            self.forward(event);
        }
    }
}

impl Drop for UploadFormApp {
    fn drop(&mut self) {
        let cancelled = self.controller.dispose();
        self.controller.page().clear_change_listener();
        tracing::info!(timers = cancelled, "upload form closed");
    }
}

fn notice_frame<R>(
    ui: &mut egui::Ui,
    kind: NotificationKind,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let (fill, stroke) = kind_colors(kind);
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, add_contents)
        .inner
}

fn kind_colors(kind: NotificationKind) -> (egui::Color32, egui::Color32) {
    match kind {
        NotificationKind::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Color32::from_rgb(175, 96, 96),
        ),
        NotificationKind::Success => (
            egui::Color32::from_rgb(46, 94, 62),
            egui::Color32::from_rgb(92, 160, 112),
        ),
        NotificationKind::Info => (
            egui::Color32::from_rgb(44, 78, 112),
            egui::Color32::from_rgb(90, 136, 184),
        ),
    }
}

fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

fn default_upload_dir() -> Option<PathBuf> {
    dirs::video_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::desktop_dir)
        .or_else(dirs::home_dir)
}
