//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{HttpStudentApi, PageView, StudentApi, StudentForm, StudentsPage};
use crossbeam_channel::{Receiver, Sender};
use shared::{
    domain::Student,
    error::{ApiError, ErrorCode},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Forwards everything the page shows to the UI thread.
pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn emit(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            tracing::debug!("ui event dropped; window closed");
        }
    }
}

impl PageView for ChannelView {
    fn show_rows(&mut self, students: &[Student]) {
        self.emit(UiEvent::RowsReplaced(students.to_vec()));
    }

    fn show_form(&mut self, form: &StudentForm) {
        self.emit(UiEvent::FormReplaced(form.clone()));
    }

    fn alert(&mut self, message: &str) {
        self.emit(UiEvent::Alert(message.to_string()));
    }

    fn request_failed(&mut self, error: &ApiError) {
        self.emit(UiEvent::Error(UiError::from_api(UiErrorContext::Request, error)));
        self.alert(&format!("Error: {error}"));
    }
}

fn startup_failure(ui_tx: &Sender<UiEvent>, error: ApiError) {
    tracing::error!("backend startup failed: {error}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_api(
        UiErrorContext::BackendStartup,
        &error,
    )));
}

pub async fn handle_command<A: StudentApi>(
    page: &mut StudentsPage<A, ChannelView>,
    cmd: BackendCommand,
) {
    tracing::debug!(command = cmd.name(), "processing ui command");
    match cmd {
        BackendCommand::Reload => {
            page.refresh().await;
        }
        BackendCommand::Submit { form } => {
            page.set_form(form);
            page.submit().await;
        }
        BackendCommand::BeginEdit { id } => {
            page.begin_edit(id).await;
        }
        BackendCommand::CancelEdit => page.cancel_edit(),
        BackendCommand::Delete { id } => {
            page.delete(id).await;
        }
    }
}

pub fn launch(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                startup_failure(
                    &ui_tx,
                    ApiError::new(
                        ErrorCode::Internal,
                        format!("failed to build backend runtime: {err}"),
                    ),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpStudentApi::new(&api_url) {
                Ok(api) => api,
                Err(err) => {
                    startup_failure(&ui_tx, ApiError::from(&err));
                    return;
                }
            };
            let mut page = StudentsPage::new(api, ChannelView::new(ui_tx.clone()));
            let _ = ui_tx.try_send(UiEvent::Info(format!("Loading {api_url}")));
            page.start().await;

            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&mut page, cmd).await;
            }
            tracing::info!("command queue closed; backend worker exiting");
        });
    });
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::StudentId;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn drain(ui_rx: &Receiver<UiEvent>) -> Vec<UiEvent> {
        ui_rx.try_iter().collect()
    }

    #[test]
    fn channel_view_forwards_rows_form_and_alerts() {
        let (ui_tx, ui_rx) = bounded(8);
        let mut view = ChannelView::new(ui_tx);
        let student = Student {
            id: StudentId(3),
            name: "Ana".into(),
            class_group: "3A".into(),
            course: "ADS".into(),
            enrollment: "2024001".into(),
        };

        view.show_rows(std::slice::from_ref(&student));
        view.show_form(&StudentForm::for_student(&student));
        view.alert("Student updated successfully!");

        let events = drain(&ui_rx);
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], UiEvent::RowsReplaced(rows) if rows == &vec![student.clone()]));
        assert!(matches!(&events[1], UiEvent::FormReplaced(form) if form.editing == Some(StudentId(3))));
        assert!(matches!(&events[2], UiEvent::Alert(text) if text == "Student updated successfully!"));
    }

    #[test]
    fn request_failure_becomes_error_event_and_alert() {
        let (ui_tx, ui_rx) = bounded(8);
        let mut view = ChannelView::new(ui_tx);

        view.request_failed(&ApiError::new(
            ErrorCode::NotFound,
            "failed to delete student: server responded with 404 Not Found",
        ));

        let events = drain(&ui_rx);
        assert_eq!(events.len(), 2);
        match &events[0] {
            UiEvent::Error(err) => {
                assert_eq!(err.category(), UiErrorCategory::NotFound);
                assert_eq!(err.context(), UiErrorContext::Request);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            &events[1],
            UiEvent::Alert(text) if text == "Error: failed to delete student: server responded with 404 Not Found"
        ));
    }

    #[test]
    fn closed_window_does_not_panic_the_view() {
        let (ui_tx, ui_rx) = bounded(1);
        drop(ui_rx);
        let mut view = ChannelView::new(ui_tx);
        view.alert("nobody listening");
    }

    #[tokio::test]
    async fn reload_against_unreachable_server_alerts_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

        let (ui_tx, ui_rx) = bounded(8);
        let api = HttpStudentApi::new(&format!("http://{addr}/alunos")).expect("api");
        let mut page = StudentsPage::new(api, ChannelView::new(ui_tx));

        handle_command(&mut page, BackendCommand::Reload).await;

        let events = drain(&ui_rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            UiEvent::Error(err) if err.category() == UiErrorCategory::Transport
        ));
        assert!(matches!(
            &events[1],
            UiEvent::Alert(text) if text.starts_with("Error: failed to load students:")
        ));
    }

    #[tokio::test]
    async fn invalid_submit_alerts_without_error_event() {
        let (ui_tx, ui_rx) = bounded(8);
        let api = HttpStudentApi::new("http://127.0.0.1:9/alunos").expect("api");
        let mut page = StudentsPage::new(api, ChannelView::new(ui_tx));

        handle_command(
            &mut page,
            BackendCommand::Submit {
                form: StudentForm::default(),
            },
        )
        .await;

        let events = drain(&ui_rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], UiEvent::Alert(text) if text == "All fields are required."));
    }
}
