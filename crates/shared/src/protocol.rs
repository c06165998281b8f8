use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{EditableField, EmployeeId, Gender},
    error::{FieldErrors, ProtocolError},
};

pub const COMPONENT_INDEX: &str = "Employees/Index";
pub const COMPONENT_CREATE: &str = "Employees/Create";
pub const COMPONENT_SHOW: &str = "Employees/Show";
pub const COMPONENT_EDIT: &str = "Employees/Edit";

/// Server-owned snapshot of one employee, immutable for the lifetime of the
/// page that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn editable_fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            email: self.email.clone(),
            gender: Some(self.gender),
        }
    }
}

/// Request body for create and update. Values are sent exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
}

impl EmployeeFields {
    /// Text shown in the input for `field`; an unselected gender is empty.
    pub fn value(&self, field: EditableField) -> String {
        match field {
            EditableField::Name => self.name.clone(),
            EditableField::Email => self.email.clone(),
            EditableField::Gender => self
                .gender
                .map(|gender| gender.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// One-shot notice attached to a single page payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashNotice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlashNotice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.success.as_deref().map_or(true, str::is_empty)
            && self.error.as_deref().map_or(true, str::is_empty)
    }

    /// Drops empty notices so views only ever hold something to show.
    pub fn non_empty(notice: Option<FlashNotice>) -> Option<FlashNotice> {
        notice.filter(|notice| !notice.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexProps {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub flash: Option<FlashNotice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProps {
    #[serde(default)]
    pub flash: Option<FlashNotice>,
    /// Validation errors the form was redirected back with.
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProps {
    pub employee: Employee,
    #[serde(default)]
    pub flash: Option<FlashNotice>,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

/// Raw page response: a component name, its props and the URL the page
/// now lives at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub component: String,
    #[serde(default)]
    pub props: serde_json::Value,
    pub url: String,
}

#[derive(Debug, Clone)]
pub enum Page {
    Index { url: String, props: IndexProps },
    Create { url: String, props: CreateProps },
    Show { url: String, props: EmployeeProps },
    Edit { url: String, props: EmployeeProps },
}

impl Page {
    pub fn url(&self) -> &str {
        match self {
            Page::Index { url, .. }
            | Page::Create { url, .. }
            | Page::Show { url, .. }
            | Page::Edit { url, .. } => url,
        }
    }

    pub fn component(&self) -> &'static str {
        match self {
            Page::Index { .. } => COMPONENT_INDEX,
            Page::Create { .. } => COMPONENT_CREATE,
            Page::Show { .. } => COMPONENT_SHOW,
            Page::Edit { .. } => COMPONENT_EDIT,
        }
    }

    pub fn flash(&self) -> Option<&FlashNotice> {
        match self {
            Page::Index { props, .. } => props.flash.as_ref(),
            Page::Create { props, .. } => props.flash.as_ref(),
            Page::Show { props, .. } | Page::Edit { props, .. } => props.flash.as_ref(),
        }
    }

    /// Non-empty field errors on a form page, as left by a redirect back
    /// from a rejected submit.
    pub fn errors(&self) -> Option<&FieldErrors> {
        let errors = match self {
            Page::Create { props, .. } => &props.errors,
            Page::Edit { props, .. } => &props.errors,
            Page::Index { .. } | Page::Show { .. } => return None,
        };
        (!errors.is_empty()).then_some(errors)
    }

    pub fn into_envelope(self) -> Result<PageEnvelope, ProtocolError> {
        let component = self.component().to_string();
        let (url, props) = match self {
            Page::Index { url, props } => (url, serde_json::to_value(props)?),
            Page::Create { url, props } => (url, serde_json::to_value(props)?),
            Page::Show { url, props } | Page::Edit { url, props } => {
                (url, serde_json::to_value(props)?)
            }
        };
        Ok(PageEnvelope {
            component,
            props,
            url,
        })
    }
}

impl TryFrom<PageEnvelope> for Page {
    type Error = ProtocolError;

    fn try_from(envelope: PageEnvelope) -> Result<Self, Self::Error> {
        let PageEnvelope {
            component,
            props,
            url,
        } = envelope;
        let malformed = |source| ProtocolError::MalformedProps {
            component: component.clone(),
            source,
        };

        match component.as_str() {
            COMPONENT_INDEX => Ok(Page::Index {
                url,
                props: serde_json::from_value(props).map_err(malformed)?,
            }),
            COMPONENT_CREATE => {
                let props = if props.is_null() {
                    CreateProps::default()
                } else {
                    serde_json::from_value(props).map_err(malformed)?
                };
                Ok(Page::Create { url, props })
            }
            COMPONENT_SHOW => Ok(Page::Show {
                url,
                props: serde_json::from_value(props).map_err(malformed)?,
            }),
            COMPONENT_EDIT => Ok(Page::Edit {
                url,
                props: serde_json::from_value(props).map_err(malformed)?,
            }),
            other => Err(ProtocolError::UnknownComponent(other.to_string())),
        }
    }
}

pub fn employees_route() -> &'static str {
    "/employees"
}

pub fn create_employee_route() -> &'static str {
    "/employees/create"
}

pub fn employee_route(id: EmployeeId) -> String {
    format!("/employees/{}", id.0)
}

pub fn edit_employee_route(id: EmployeeId) -> String {
    format!("/employees/{}/edit", id.0)
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
