use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::EmployeeId;

pub const EMPLOYEES_PATH: &str = "/api/employees";
pub const CREATE_EMPLOYEES_PATH: &str = "/api/employees/create";
pub const UPDATE_EMPLOYEES_PATH: &str = "/api/employees/update";
pub const DELETE_EMPLOYEES_PATH: &str = "/api/employees/delete";

/// Mutable fields of an employee, as sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, with = "salary_string")]
    pub salary: String,
}

/// Body of `POST /api/employees/create`.
pub type CreateEmployeesRequest = Vec<EmployeeFields>;

/// Body of `PUT /api/employees/update`, keyed by employee id.
pub type UpdateEmployeesRequest = BTreeMap<EmployeeId, EmployeeFields>;

/// Value of the `ids` query parameter for bulk deletes.
pub fn join_ids(ids: &[EmployeeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Salary travels as a string from the client but the server may echo it back
/// as a JSON number.
pub mod salary_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(text)) => Ok(text),
            Some(Value::Number(number)) => Ok(number.to_string()),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected salary as string or number, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_ids_with_commas() {
        assert_eq!(join_ids(&[EmployeeId(3), EmployeeId(4)]), "3,4");
        assert_eq!(join_ids(&[EmployeeId(9)]), "9");
    }

    #[test]
    fn update_body_is_keyed_by_id() {
        let mut body = UpdateEmployeesRequest::new();
        body.insert(
            EmployeeId(3),
            EmployeeFields {
                name: "Bob".to_string(),
                position: "Ops".to_string(),
                salary: "90".to_string(),
            },
        );
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"3": {"name": "Bob", "position": "Ops", "salary": "90"}})
        );
    }

    #[test]
    fn rejects_non_scalar_salary() {
        let err = serde_json::from_str::<EmployeeFields>(r#"{"salary":[1]}"#);
        assert!(err.is_err());
    }
}
