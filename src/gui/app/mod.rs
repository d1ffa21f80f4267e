use std::{
    collections::HashSet,
    time::Duration,
};

use eframe::egui::{
    self,
    RichText,
};
use egui_extras::{
    Column,
    TableBuilder,
};
use tracing::debug;

use super::{
    message_overlay::MessageOverlay,
    theme::{
        set_theme,
        Theme,
    },
};
use crate::{
    config::Config,
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        PredictError,
    },
    form::{
        PredictionForm,
        SubmitAttempt,
    },
    predict::PredictionResult,
};

pub struct HeartCheckApp {
    // Configuration
    config: Config,

    // Form
    form: PredictionForm,

    // UI State
    theme: Theme,
    message_overlay: MessageOverlay,

    task_manager: TaskManager,
}

impl HeartCheckApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        task_manager: TaskManager,
    ) -> Self {
        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        Self {
            form: PredictionForm::new(config.schema),
            config,
            theme,
            message_overlay: MessageOverlay::new(),
            task_manager,
        }
    }

    fn submit(&mut self) {
        match self.form.begin_submit() {
            SubmitAttempt::Started { submission_id, record } => {
                self.message_overlay.set_message("Predicting...".to_string());
                self.task_manager.submit_prediction(submission_id, record);
            }
            SubmitAttempt::Rejected => {
                debug!("Form has invalid fields, nothing sent");
            }
            SubmitAttempt::Ignored => {}
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        debug!(task = result.task_type(), "Task finished");
        match result {
            TaskResult::Prediction { submission_id, outcome } => {
                self.form.settle(submission_id, outcome);
            }
        }

        if !self.form.is_loading() {
            self.message_overlay.clear_message();
        }
    }

    fn invalid_fields(&self) -> HashSet<String> {
        match self.form.error() {
            Some(PredictError::Validation(errors)) => {
                errors.iter().map(|error| error.field.clone()).collect()
            }
            _ => HashSet::new(),
        }
    }

    fn field_table(&mut self, ui: &mut egui::Ui) {
        let invalid = self.invalid_fields();
        let enabled = self.form.can_submit();
        let schema = self.form.schema();
        let theme = &self.theme;
        let input = self.form.input_mut();

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(200.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.label(theme.heading("Field"));
                });
                header.col(|ui| {
                    ui.label(theme.heading("Value"));
                });
                header.col(|ui| {
                    ui.label(theme.heading("Range"));
                });
            })
            .body(|mut body| {
                for field in schema.fields() {
                    body.row(28.0, |mut row| {
                        row.col(|ui| {
                            ui.label(field.label).on_hover_text(field.name);
                        });
                        row.col(|ui| {
                            if field.is_flag() {
                                let mut checked = input.flag(field.name);
                                let response = ui
                                    .add_enabled(enabled, egui::Checkbox::without_text(&mut checked))
                                    .on_hover_text(field.placeholder);
                                if response.changed() {
                                    input.set_flag(field.name, checked);
                                }
                            } else if let Some(value) = input.value_mut(field.name) {
                                ui.add_enabled(
                                    enabled,
                                    egui::TextEdit::singleline(value)
                                        .hint_text(field.placeholder)
                                        .desired_width(120.0),
                                );
                            }
                        });
                        row.col(|ui| {
                            if invalid.contains(field.name) {
                                ui.colored_label(theme.red, format!("⚠ {}", field.range_hint()));
                            } else {
                                ui.weak(field.range_hint());
                            }
                        });
                    });
                }
            });
    }

    fn result_panel(&self, ui: &mut egui::Ui, result: &PredictionResult) {
        let tier_color = self.theme.tier_color(result.tier);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(self.theme.heading("Prediction Result"));
                ui.label(RichText::new(result.headline()).size(24.0).strong().color(tier_color));
                ui.label(result.probability_text());
                ui.colored_label(tier_color, format!("Risk tier: {}", result.tier));
                ui.label(result.tier.message());
                ui.weak(format!(
                    "Received at {}",
                    result.received_at.with_timezone(&chrono::Local).format("%H:%M:%S")
                ));
            });
        });
    }

    fn error_panel(&self, ui: &mut egui::Ui, message: &str) {
        egui::Frame::group(ui.style()).fill(self.theme.red.linear_multiply(0.15)).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.colored_label(self.theme.red, RichText::new(format!("Error: {}", message)).strong());
            });
        });
    }
}

impl eframe::App for HeartCheckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();

        for result in task_results {
            self.handle_task_result(result);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Endpoint: {}", self.config.endpoint));
                ui.separator();
                ui.label(format!("Schema: {}", self.config.schema.title()));
                ui.separator();
                ui.label(format!("Timeout: {}s", self.config.timeout_secs));
            });
        });

        let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
        let mut submit_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(self.theme.bold("Heart Disease Prediction"));
                    ui.label("Enter the patient's details below to predict the risk of heart disease.");
                });
                ui.add_space(10.0);

                self.field_table(ui);
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    let loading = self.form.is_loading();
                    let label = if loading { "Predicting..." } else { "Predict" };

                    submit_clicked =
                        ui.add_enabled(self.form.can_submit(), egui::Button::new(label)).clicked();

                    if ui.add_enabled(!loading, egui::Button::new("Reset")).clicked() {
                        self.form.reset();
                    }

                    if loading {
                        ui.add(egui::Spinner::new());
                    }
                });
                ui.add_space(10.0);

                if let Some(result) = self.form.result() {
                    self.result_panel(ui, result);
                } else if let Some(message) = self.form.error_message() {
                    self.error_panel(ui, &message);
                }

                ui.add_space(6.0);
                ui.weak("Risk tiers use fixed 15% / 50% cut-offs and are not clinical advice.");
            });
        });

        if submit_clicked || enter_pressed {
            self.submit();
        }

        self.message_overlay.show(ctx, &self.theme);

        if self.form.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
