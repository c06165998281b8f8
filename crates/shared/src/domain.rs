use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Capitalised form used by badges and select options.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ProtocolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(ProtocolError::UnknownGender(other.to_string())),
        }
    }
}

/// The fields a client may write. Everything else on an [`Employee`] is
/// display-only.
///
/// Field names double as the keys of server validation payloads.
///
/// [`Employee`]: crate::protocol::Employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    Name,
    Email,
    Gender,
}

impl EditableField {
    pub const ALL: [EditableField; 3] = [
        EditableField::Name,
        EditableField::Email,
        EditableField::Gender,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EditableField::Name => "name",
            EditableField::Email => "email",
            EditableField::Gender => "gender",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditableField::Name => "Name",
            EditableField::Email => "Email",
            EditableField::Gender => "Gender",
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditableField {
    type Err = ProtocolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(EditableField::Name),
            "email" => Ok(EditableField::Email),
            "gender" => Ok(EditableField::Gender),
            other => Err(ProtocolError::UnknownField(other.to_string())),
        }
    }
}
