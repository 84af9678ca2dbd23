use shared::{
    domain::{Student, StudentId},
    protocol::StudentDraft,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("All fields are required.")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Raw form input. `editing` selects between create and full replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub class_group: String,
    pub course: String,
    pub enrollment: String,
    pub editing: Option<StudentId>,
}

impl StudentForm {
    pub fn for_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            class_group: student.class_group.clone(),
            course: student.course.clone(),
            enrollment: student.enrollment.clone(),
            editing: Some(student.id),
        }
    }

    pub fn validate(&self) -> Result<StudentDraft, ValidationError> {
        let fields = [
            ("name", self.name.trim()),
            ("class", self.class_group.trim()),
            ("course", self.course.trim()),
            ("enrollment", self.enrollment.trim()),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        let [name, class_group, course, enrollment] = fields.map(|(_, value)| value.to_string());
        Ok(StudentDraft {
            name,
            class_group,
            course,
            enrollment,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> StudentForm {
        StudentForm {
            name: "  Ana Souza ".into(),
            class_group: "3A".into(),
            course: "\tADS".into(),
            enrollment: "2024001\n".into(),
            editing: None,
        }
    }

    #[test]
    fn validate_trims_every_field() {
        let draft = filled().validate().expect("valid");
        assert_eq!(draft.name, "Ana Souza");
        assert_eq!(draft.course, "ADS");
        assert_eq!(draft.enrollment, "2024001");
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let mut form = filled();
        form.class_group = "   ".into();
        form.enrollment.clear();

        let err = form.validate().expect_err("must fail");
        assert_eq!(err.missing, vec!["class", "enrollment"]);
        assert_eq!(err.to_string(), "All fields are required.");
    }

    #[test]
    fn reset_leaves_edit_mode() {
        let mut form = filled();
        form.editing = Some(StudentId(8));
        form.reset();
        assert_eq!(form, StudentForm::default());
    }
}
