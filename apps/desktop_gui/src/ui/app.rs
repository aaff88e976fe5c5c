use std::{path::PathBuf, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use intake_core::{AttachmentGate, FormController, Notice, SubmitRejected};
use shared::{
    domain::{AttachmentSlot, FieldId, HandoverLocation, TextField, YesNo},
    error::FieldErrorKind,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, DispatchFailure};
use crate::ui::i18n::{
    field_error, field_label, location_label, rejection_message, slot_label, text, yes_no_label,
    Language, Text,
};

pub struct StartupConfig {
    pub gate: AttachmentGate,
    /// Set when settings could not be loaded; the form stays usable but
    /// cannot be submitted.
    pub config_error: Option<UiError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendState {
    Starting,
    Ready,
    Unavailable,
}

pub struct IntakeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: FormController,
    language: Language,
    backend: BackendState,
    in_flight: Option<Uuid>,
    notice: Option<Notice>,
    status_banner: Option<UiError>,
}

impl IntakeApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let backend = if startup.config_error.is_some() {
            BackendState::Unavailable
        } else {
            BackendState::Starting
        };
        Self {
            cmd_tx,
            ui_rx,
            controller: FormController::new(startup.gate),
            language: Language::default(),
            backend,
            in_flight: None,
            notice: None,
            status_banner: startup.config_error,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    if self.backend == BackendState::Starting {
                        self.backend = BackendState::Ready;
                    }
                }
                UiEvent::SubmissionFinished { id, outcome } => {
                    if self.in_flight != Some(id) {
                        warn!(submission_id = %id, "ignoring result for unknown submission");
                        continue;
                    }
                    self.in_flight = None;
                    if let Err(err) = &outcome {
                        let ui_error = UiError::from_submit_error(err);
                        warn!(
                            submission_id = %id,
                            category = ?ui_error.category(),
                            "submission failed"
                        );
                    }
                    self.controller.finish_submit(outcome);
                }
                UiEvent::Error(err) => {
                    if err.blocks_submission() {
                        self.backend = BackendState::Unavailable;
                    }
                    self.status_banner = Some(err);
                }
            }
        }

        if let Some(notice) = self.controller.take_notice() {
            self.notice = Some(notice);
        }
    }

    fn can_submit(&self) -> bool {
        self.backend == BackendState::Ready
            && !self.controller.is_submitting()
            && self.notice.is_none()
    }

    fn submit(&mut self) {
        let prepared = match self.controller.begin_submit() {
            Ok(prepared) => prepared,
            // Errors are published on the controller and rendered inline.
            Err(SubmitRejected::Invalid(_)) | Err(SubmitRejected::InFlight) => return,
        };

        let id = prepared.id();
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit(prepared)) {
            Ok(()) => {
                info!(submission_id = %id, "submission queued");
                self.in_flight = Some(id);
            }
            Err(failure) => {
                if failure == DispatchFailure::WorkerDisconnected {
                    self.backend = BackendState::Unavailable;
                }
                self.controller.finish_submit(Err(failure.into_submit_error()));
            }
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        let lang = self.language;
        ui.horizontal(|ui| {
            ui.heading(text(lang, Text::Title));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::ComboBox::from_id_salt("language")
                    .selected_text(self.language.label())
                    .show_ui(ui, |ui| {
                        for option in Language::ALL {
                            ui.selectable_value(&mut self.language, option, option.label());
                        }
                    });
                ui.label("🌐");
            });
        });
        ui.weak(text(lang, Text::Description));
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        let (fill, stroke) = match banner.category() {
            UiErrorCategory::Configuration => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
            _ => (
                egui::Color32::from_rgb(110, 84, 40),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(176, 138, 74)),
            ),
        };
        let message = if banner.blocks_submission() {
            format!(
                "{} {}",
                text(self.language, Text::SubmissionUnavailable),
                banner.message()
            )
        } else {
            banner.message().to_string()
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(text(self.language, Text::Dismiss)).clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let lang = self.language;
        let errors = self.controller.errors().clone();

        for field in self.controller.visible_fields() {
            ui.add_space(10.0);
            let mut label = egui::RichText::new(field_label(lang, field)).strong();
            if field == FieldId::WantsRenewal {
                label = label.size(16.0);
            }
            ui.horizontal(|ui| {
                ui.label(label);
                if field
                    .attachment_slot()
                    .is_some_and(|slot| !slot.is_required())
                {
                    ui.weak(text(lang, Text::Optional));
                }
            });

            match field {
                FieldId::WantsRenewal => {
                    let current = self.controller.draft().wants_renewal;
                    if let Some(value) = yes_no_row(ui, lang, current) {
                        self.controller.set_wants_renewal(value);
                    }
                }
                FieldId::HasDependents => {
                    let current = self.controller.draft().has_dependents;
                    if let Some(value) = yes_no_row(ui, lang, current) {
                        self.controller.set_has_dependents(value);
                    }
                }
                FieldId::HandoverLocation => self.show_location(ui),
                other => {
                    if let Some(text_field) = other.text_field() {
                        ui.add(
                            egui::TextEdit::singleline(self.controller.text_mut(text_field))
                                .hint_text(placeholder(text_field))
                                .desired_width(f32::INFINITY),
                        );
                    } else if let Some(slot) = other.attachment_slot() {
                        self.show_attachment_slot(ui, slot);
                    }
                }
            }

            if let Some(kind) = errors.get(field) {
                show_field_error(ui, lang, kind);
            }
        }

        ui.add_space(18.0);
        ui.horizontal(|ui| {
            let submitting = self.controller.is_submitting();
            let label = if submitting {
                Text::Submitting
            } else {
                Text::Submit
            };
            let button = egui::Button::new(egui::RichText::new(text(lang, label)).strong())
                .min_size(egui::vec2(120.0, 32.0));
            if ui.add_enabled(self.can_submit(), button).clicked() {
                self.submit();
            }
            if submitting {
                ui.spinner();
            } else if self.backend == BackendState::Starting {
                ui.weak(text(lang, Text::BackendStarting));
            }
        });
        ui.add_space(12.0);
    }

    fn show_location(&mut self, ui: &mut egui::Ui) {
        let lang = self.language;
        let current = self.controller.draft().handover_location;
        let mut selected = current;
        let selected_text = current
            .map(|location| location_label(lang, location))
            .unwrap_or_else(|| text(lang, Text::SelectLocation));
        egui::ComboBox::from_id_salt("handover_location")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for location in HandoverLocation::ALL {
                    ui.selectable_value(
                        &mut selected,
                        Some(*location),
                        location_label(lang, *location),
                    );
                }
            });
        if selected != current {
            self.controller.set_handover_location(selected);
        }
    }

    fn show_attachment_slot(&mut self, ui: &mut egui::Ui, slot: AttachmentSlot) {
        let lang = self.language;
        let attached = self
            .controller
            .draft()
            .attachment(slot)
            .map(|attachment| (attachment.name().to_string(), attachment.human_size()));

        ui.horizontal(|ui| {
            match &attached {
                Some((name, size)) => {
                    ui.label(format!("📄 {name}"));
                    ui.weak(size);
                }
                None => {
                    ui.weak(text(lang, Text::NoFileSelected));
                }
            }

            let pick = if attached.is_some() {
                Text::ReplaceFile
            } else {
                Text::ChooseFile
            };
            if ui.button(text(lang, pick)).clicked() {
                if let Some(path) = pick_pdf(slot_label(lang, slot)) {
                    // Rejections stay on the controller and render below the slot.
                    let _ = self.controller.select_attachment_path(slot, &path);
                }
            }
            if attached.is_some() && ui.button(text(lang, Text::RemoveFile)).clicked() {
                self.controller.set_attachment(slot, None);
            }
        });
        ui.weak(text(lang, Text::PdfHint));

        if let Some(rejection) = self.controller.attachment_rejection(slot) {
            ui.colored_label(
                ui.visuals().error_fg_color,
                rejection_message(lang, rejection),
            );
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice else {
            return;
        };
        let lang = self.language;
        let (title, body) = match notice {
            Notice::Submitted => (Text::SubmittedTitle, Text::SubmittedBody),
            Notice::SubmitFailed => (Text::FailedTitle, Text::FailedBody),
        };

        let mut dismissed = false;
        egui::Window::new(text(lang, title))
            .id(egui::Id::new("submission_notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(text(lang, body));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button(text(lang, Text::Close)).clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for IntakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(12)))
            .show(ctx, |ui| {
                self.show_header(ui);
                ui.add_space(6.0);
                self.show_status_banner(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
            if self.controller.take_scroll_request() {
                scroll = scroll.vertical_scroll_offset(0.0);
            }
            let blocked = self.notice.is_some();
            scroll.show(ui, |ui| {
                ui.add_enabled_ui(!blocked, |ui| self.show_form(ui));
            });
        });

        self.show_notice(ctx);

        if self.controller.is_submitting() || self.backend == BackendState::Starting {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Returns the new value when the user changed the selection.
fn yes_no_row(
    ui: &mut egui::Ui,
    lang: Language,
    current: Option<YesNo>,
) -> Option<Option<YesNo>> {
    let mut selected = current;
    ui.horizontal(|ui| {
        for value in YesNo::ALL {
            ui.radio_value(&mut selected, Some(*value), yes_no_label(lang, *value));
        }
    });
    (selected != current).then_some(selected)
}

fn show_field_error(ui: &mut egui::Ui, lang: Language, kind: FieldErrorKind) {
    ui.colored_label(ui.visuals().error_fg_color, field_error(lang, kind));
}

fn placeholder(field: TextField) -> &'static str {
    match field {
        TextField::Email => "person@example.com",
        TextField::BmsNumber => "BMS12345",
        TextField::FullName => "Alex Tan",
        TextField::PassportNumber => "A12345678",
        TextField::PassportExpiry | TextField::PassportIssue => "YYYY-MM-DD",
        TextField::IssueCountry => "Malaysia",
        TextField::TaxNumber => "IG987654321",
    }
}

fn pick_pdf(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("PDF", &["pdf"])
        .pick_file()
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
