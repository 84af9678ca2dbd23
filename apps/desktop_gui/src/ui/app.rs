use std::collections::VecDeque;

use client_core::{
    render::{TableRow, COLUMNS},
    StudentForm,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

pub struct StudentsApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    rows: Vec<TableRow>,
    form: StudentForm,
    alerts: VecDeque<String>,
    status: String,
    status_banner: Option<String>,
}

impl StudentsApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            rows: Vec::new(),
            form: StudentForm::default(),
            alerts: VecDeque::new(),
            status: "Starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_ui_event(event);
        }
    }

    fn apply_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::RowsReplaced(students) => {
                self.rows = students.iter().map(TableRow::from).collect();
                self.status = format!("{} student(s) loaded", self.rows.len());
                self.status_banner = None;
            }
            UiEvent::FormReplaced(form) => self.form = form,
            UiEvent::Alert(message) => self.alerts.push_back(message),
            UiEvent::Error(err) => {
                tracing::error!(context = ?err.context(), "{}", err.message());
                self.status_banner = Some(err.banner());
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alerts.front() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.alerts.pop_front();
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, queued: &mut Vec<BackendCommand>) {
        let title = match self.form.editing {
            Some(id) => format!("Edit student #{id}"),
            None => "New student".to_string(),
        };
        ui.heading(title);

        egui::Grid::new("student_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (label, value) in [
                    ("Name", &mut self.form.name),
                    ("Class", &mut self.form.class_group),
                    ("Course", &mut self.form.course),
                    ("Enrollment", &mut self.form.enrollment),
                ] {
                    ui.label(label);
                    ui.add(egui::TextEdit::singleline(value).desired_width(260.0));
                    ui.end_row();
                }
            });

        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                queued.push(BackendCommand::Submit {
                    form: self.form.clone(),
                });
            }
            if self.form.editing.is_some() && ui.button("Cancel edit").clicked() {
                self.form.reset();
                queued.push(BackendCommand::CancelEdit);
            }
        });
    }

    fn show_table(&self, ui: &mut egui::Ui, queued: &mut Vec<BackendCommand>) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("students_table")
                .striped(true)
                .num_columns(COLUMNS.len() + 1)
                .show(ui, |ui| {
                    for title in COLUMNS {
                        ui.strong(title);
                    }
                    ui.strong("Actions");
                    ui.end_row();

                    for row in &self.rows {
                        for cell in &row.cells {
                            ui.label(cell.as_str());
                        }
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                queued.push(BackendCommand::BeginEdit { id: row.id });
                            }
                            if ui.button("Delete").clicked() {
                                queued.push(BackendCommand::Delete { id: row.id });
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }
}

impl eframe::App for StudentsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut queued = Vec::new();
        let interactive = self.alerts.is_empty();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| {
                if let Some(banner) = &self.status_banner {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, banner.as_str());
                }
                self.show_form(ui, &mut queued);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.heading("Students");
                    if ui.button("Reload").clicked() {
                        queued.push(BackendCommand::Reload);
                    }
                });
                self.show_table(ui, &mut queued);
            });
        });

        self.show_alert(ctx);

        for cmd in queued {
            self.dispatch(cmd);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{
        domain::{Student, StudentId},
        error::{ApiError, ErrorCode},
    };

    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};

    fn app() -> (StudentsApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        (StudentsApp::new(cmd_tx, ui_rx), cmd_rx)
    }

    fn student(id: i64, name: &str) -> Student {
        Student {
            id: StudentId(id),
            name: name.to_string(),
            class_group: "3A".to_string(),
            course: "ADS".to_string(),
            enrollment: format!("2024{id:03}"),
        }
    }

    #[test]
    fn rows_event_replaces_previous_rows() {
        let (mut app, _rx) = app();
        app.apply_ui_event(UiEvent::RowsReplaced(vec![student(1, "Ana"), student(2, "Bia")]));
        app.apply_ui_event(UiEvent::RowsReplaced(vec![student(3, "Caio")]));

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].cells[1], "Caio");
        assert_eq!(app.status, "1 student(s) loaded");
    }

    #[test]
    fn alerts_queue_in_arrival_order() {
        let (mut app, _rx) = app();
        app.apply_ui_event(UiEvent::Alert("first".into()));
        app.apply_ui_event(UiEvent::Alert("second".into()));

        assert_eq!(app.alerts.front().map(String::as_str), Some("first"));
        assert_eq!(app.alerts.len(), 2);
    }

    #[test]
    fn form_event_enters_edit_mode() {
        let (mut app, _rx) = app();
        app.apply_ui_event(UiEvent::FormReplaced(StudentForm::for_student(&student(4, "Davi"))));

        assert_eq!(app.form.editing, Some(StudentId(4)));
        assert_eq!(app.form.name, "Davi");
    }

    #[test]
    fn startup_error_sets_banner() {
        let (mut app, _rx) = app();
        app.apply_ui_event(UiEvent::Error(UiError::from_api(
            UiErrorContext::BackendStartup,
            &ApiError::new(
                ErrorCode::Validation,
                "invalid collection url 'x': relative URL without a base",
            ),
        )));

        assert!(app
            .status_banner
            .as_deref()
            .is_some_and(|banner| banner.contains("collection URL")));
    }

    #[test]
    fn fresh_rows_clear_the_banner() {
        let (mut app, _rx) = app();
        app.apply_ui_event(UiEvent::Error(UiError::from_api(
            UiErrorContext::Request,
            &ApiError::new(ErrorCode::Transport, "failed to load students: connection refused"),
        )));
        assert!(app.status_banner.is_some());

        app.apply_ui_event(UiEvent::RowsReplaced(vec![student(1, "Ana")]));
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn dispatch_forwards_to_backend_queue() {
        let (mut app, rx) = app();
        app.dispatch(BackendCommand::BeginEdit { id: StudentId(9) });

        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::BeginEdit { id }) if id == StudentId(9)
        ));
    }
}
