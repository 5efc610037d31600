use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::{salary_string, EmployeeFields};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);

/// Label shown in the id column for rows the server has not persisted yet.
pub const UNSAVED_ID_LABEL: &str = "New";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    Position,
    Salary,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 3] = [
        EmployeeField::Name,
        EmployeeField::Position,
        EmployeeField::Salary,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            EmployeeField::Name => "Insert Employee Name",
            EmployeeField::Position => "Insert Position",
            EmployeeField::Salary => "Insert Salary",
        }
    }

    pub fn column_title(self) -> &'static str {
        match self {
            EmployeeField::Name => "Employee Name",
            EmployeeField::Position => "Position",
            EmployeeField::Salary => "Salary",
        }
    }
}

/// One employee row. `id` is `None` until the server has assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, with = "salary_string")]
    pub salary: String,
}

impl EmployeeRecord {
    pub fn unsaved() -> Self {
        Self::default()
    }

    pub fn display_id(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => UNSAVED_ID_LABEL.to_string(),
        }
    }

    pub fn field(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::Name => &self.name,
            EmployeeField::Position => &self.position,
            EmployeeField::Salary => &self.salary,
        }
    }

    /// Returns a copy of this record with one field replaced.
    pub fn with_field(&self, field: EmployeeField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            EmployeeField::Name => Self {
                name: value,
                ..self.clone()
            },
            EmployeeField::Position => Self {
                position: value,
                ..self.clone()
            },
            EmployeeField::Salary => Self {
                salary: value,
                ..self.clone()
            },
        }
    }

    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            position: self.position.clone(),
            salary: self.salary.clone(),
        }
    }
}
