use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(StudentId);

/// A student record as served by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(rename = "nome", default, deserialize_with = "cell_text")]
    pub name: String,
    #[serde(rename = "turma", default, deserialize_with = "cell_text")]
    pub class_group: String,
    #[serde(rename = "curso", default, deserialize_with = "cell_text")]
    pub course: String,
    #[serde(rename = "matricula", default, deserialize_with = "cell_text")]
    pub enrollment: String,
}

// Any JSON value is shown as-is in its cell; null becomes a blank cell.
fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}
