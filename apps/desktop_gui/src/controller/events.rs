//! Backend-to-UI events and error modeling for the students window.

use client_core::StudentForm;
use shared::{
    domain::Student,
    error::{ApiError, ErrorCode},
};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    RowsReplaced(Vec<Student>),
    FormReplaced(StudentForm),
    Alert(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    NotFound,
    Server,
}

impl From<ErrorCode> for UiErrorCategory {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Transport => UiErrorCategory::Transport,
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Internal => UiErrorCategory::Server,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Request,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api(context: UiErrorContext, error: &ApiError) -> Self {
        Self {
            category: error.code.into(),
            context,
            message: error.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line hint shown above the table.
    pub fn banner(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, UiErrorCategory::Validation) => {
                format!("Check the configured collection URL: {}", self.message)
            }
            (UiErrorContext::BackendStartup, _) => {
                format!("Backend unavailable; restart the app: {}", self.message)
            }
            (UiErrorContext::Request, UiErrorCategory::Transport) => {
                format!("Server unreachable; check the network and press Reload: {}", self.message)
            }
            (UiErrorContext::Request, UiErrorCategory::NotFound) => {
                format!("Record not found; press Reload to refresh the list: {}", self.message)
            }
            (UiErrorContext::Request, _) => self.message.clone(),
        }
    }
}
