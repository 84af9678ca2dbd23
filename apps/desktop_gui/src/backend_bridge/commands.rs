//! Backend commands queued from UI to backend worker.

use client_core::StudentForm;
use shared::domain::StudentId;

#[derive(Debug)]
pub enum BackendCommand {
    Reload,
    Submit { form: StudentForm },
    BeginEdit { id: StudentId },
    CancelEdit,
    Delete { id: StudentId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Reload => "reload",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::BeginEdit { .. } => "begin_edit",
            BackendCommand::CancelEdit => "cancel_edit",
            BackendCommand::Delete { .. } => "delete",
        }
    }
}
