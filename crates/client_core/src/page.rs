//! Page controller: load the table, handle the form, run row actions.
//!
//! Every action awaits its request before returning. Failures reach the user
//! through [`PageView::request_failed`] or [`PageView::alert`]; only
//! [`StudentsPage::load`] hands its error back to the caller.

use shared::{
    domain::{Student, StudentId},
    error::ApiError,
};
use tracing::{debug, warn};

use crate::{error::ClientError, form::StudentForm, StudentApi};

pub const CREATED_ALERT: &str = "Student created successfully!";
pub const UPDATED_ALERT: &str = "Student updated successfully!";
pub const DELETED_ALERT: &str = "Student deleted successfully!";

/// Display region and alert surface the page drives.
pub trait PageView {
    /// Replaces everything previously shown with `students`.
    fn show_rows(&mut self, students: &[Student]);
    fn show_form(&mut self, form: &StudentForm);
    fn alert(&mut self, message: &str);

    /// A request failed. Alerts `Error: <reason>` unless overridden.
    fn request_failed(&mut self, error: &ApiError) {
        self.alert(&format!("Error: {error}"));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Form validation failed; nothing was sent.
    Invalid,
    Failed,
    Completed,
}

pub struct StudentsPage<A, V> {
    api: A,
    view: V,
    form: StudentForm,
}

impl<A: StudentApi, V: PageView> StudentsPage<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            form: StudentForm::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.form
    }

    pub fn set_form(&mut self, form: StudentForm) {
        self.form = form;
    }

    /// First load after the page comes up.
    pub async fn start(&mut self) -> Outcome {
        debug!("initial load");
        self.refresh().await
    }

    /// [`Self::load`], with the failure reported to the view.
    pub async fn refresh(&mut self) -> Outcome {
        match self.load().await {
            Ok(_) => Outcome::Completed,
            Err(err) => {
                warn!("load failed: {err}");
                self.fail(&err);
                Outcome::Failed
            }
        }
    }

    pub async fn load(&mut self) -> Result<usize, ClientError> {
        let students = self.api.list_students().await?;
        self.view.show_rows(&students);
        Ok(students.len())
    }

    pub async fn submit(&mut self) -> Outcome {
        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(err) => {
                debug!(missing = ?err.missing, "form rejected");
                self.view.alert(&err.to_string());
                return Outcome::Invalid;
            }
        };

        let (result, success_alert) = match self.form.editing {
            Some(id) => (self.api.replace_student(id, &draft).await, UPDATED_ALERT),
            None => (self.api.create_student(&draft).await, CREATED_ALERT),
        };
        if let Err(err) = result {
            self.fail(&err);
            return Outcome::Failed;
        }

        self.view.alert(success_alert);
        self.form.reset();
        self.view.show_form(&self.form);
        // The mutation stands even when the follow-up load fails.
        self.refresh().await;
        Outcome::Completed
    }

    /// Edit action of a row: fetches the record into the form.
    pub async fn begin_edit(&mut self, id: StudentId) -> Outcome {
        match self.api.fetch_student(id).await {
            Ok(student) => {
                self.form = StudentForm::for_student(&student);
                self.view.show_form(&self.form);
                Outcome::Completed
            }
            Err(err) => {
                self.fail(&err);
                Outcome::Failed
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.view.show_form(&self.form);
    }

    /// Delete action of a row.
    pub async fn delete(&mut self, id: StudentId) -> Outcome {
        if let Err(err) = self.api.delete_student(id).await {
            self.fail(&err);
            return Outcome::Failed;
        }

        if self.form.editing == Some(id) {
            self.form.reset();
            self.view.show_form(&self.form);
        }
        self.view.alert(DELETED_ALERT);
        self.refresh().await;
        Outcome::Completed
    }

    fn fail(&mut self, err: &ClientError) {
        self.view.request_failed(&ApiError::from(err));
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
