use serde::{Deserialize, Serialize};

use crate::domain::Student;

/// Body of the create and full-replacement requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "turma")]
    pub class_group: String,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "matricula")]
    pub enrollment: String,
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            class_group: student.class_group.clone(),
            course: student.course.clone(),
            enrollment: student.enrollment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentId;

    #[test]
    fn draft_serializes_with_the_same_names_the_records_use() {
        let draft = StudentDraft {
            name: "Ana".into(),
            class_group: "3A".into(),
            course: "ADS".into(),
            enrollment: "2024001".into(),
        };

        let value = serde_json::to_value(&draft).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "nome": "Ana",
                "turma": "3A",
                "curso": "ADS",
                "matricula": "2024001",
            })
        );
    }

    #[test]
    fn draft_from_record_drops_the_id() {
        let student = Student {
            id: StudentId(4),
            name: "Bia".into(),
            class_group: "2B".into(),
            course: "Redes".into(),
            enrollment: "77".into(),
        };

        let value = serde_json::to_value(StudentDraft::from(&student)).expect("encode");
        assert!(value.get("id").is_none());
        assert_eq!(value["nome"], "Bia");
    }
}
