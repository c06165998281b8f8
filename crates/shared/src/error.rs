use std::collections::{BTreeMap, HashMap};

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::EditableField;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown gender value '{0}'")]
    UnknownGender(String),
    #[error("unknown editable field '{0}'")]
    UnknownField(String),
    #[error("unknown page component '{0}'")]
    UnknownComponent(String),
    #[error("malformed props for component '{component}': {source}")]
    MalformedProps {
        component: String,
        source: serde_json::Error,
    },
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Generic error body returned alongside non-validation failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Server-reported validation messages keyed by editable field.
///
/// Always keyed by the closed [`EditableField`] set, so a key the server
/// invents can never reach a render path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<EditableField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: EditableField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: EditableField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (EditableField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Builds the mapping from a raw payload, dropping keys that are not
    /// editable fields.
    pub fn from_raw(raw: HashMap<String, ErrorMessages>) -> Self {
        let mut errors = BTreeMap::new();
        for (key, messages) in raw {
            let Ok(field) = key.parse::<EditableField>() else {
                warn!(key = %key, "dropping validation error for unknown field");
                continue;
            };
            if let Some(message) = messages.into_first() {
                errors.insert(field, message);
            }
        }
        Self(errors)
    }

    /// Decodes any of the accepted validation body shapes.
    pub fn from_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let body: ValidationErrorBody = serde_json::from_slice(body)?;
        Ok(body.into_field_errors())
    }
}

impl FromIterator<(EditableField, String)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (EditableField, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Page props carry the same mapping; an empty bag may arrive as `[]`.
impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PropErrors::deserialize(deserializer)? {
            PropErrors::Map(raw) => Ok(Self::from_raw(raw)),
            PropErrors::Empty(_) => Ok(Self::new()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropErrors {
    Map(HashMap<String, ErrorMessages>),
    Empty(Vec<IgnoredAny>),
}

/// A single message or the list form some backends emit; only the first
/// entry is shown.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessages {
    fn into_first(self) -> Option<String> {
        match self {
            ErrorMessages::One(message) => Some(message),
            ErrorMessages::Many(messages) => messages.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrorBody {
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        errors: HashMap<String, ErrorMessages>,
    },
    Bare(HashMap<String, ErrorMessages>),
}

impl ValidationErrorBody {
    pub fn into_field_errors(self) -> FieldErrors {
        match self {
            ValidationErrorBody::Wrapped { errors, .. } => FieldErrors::from_raw(errors),
            ValidationErrorBody::Bare(errors) => FieldErrors::from_raw(errors),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
