use shared::{
    domain::{EditableField, EmployeeId, Gender},
    error::{FieldErrors, ProtocolError},
    protocol::{employees_route, Employee, EmployeeFields, FlashNotice},
};
use tracing::{info, warn};

use crate::{
    endpoint::VisitRequest,
    render::{flash_banners, FlashBanner, Link},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { employee: Employee },
}

/// Controlled-input state for creating or editing one employee.
///
/// Errors are replaced wholesale when a submission is rejected and cleared
/// when one succeeds. Typing does not touch them, so a message stays next to
/// its input until the next submit.
#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    initial: EmployeeFields,
    fields: EmployeeFields,
    errors: FieldErrors,
    submitting: bool,
    failure: Option<String>,
    flash: Option<FlashNotice>,
}

impl FormController {
    pub fn create(flash: Option<FlashNotice>) -> Self {
        Self::with_mode(FormMode::Create, EmployeeFields::default(), flash)
    }

    pub fn edit(employee: Employee, flash: Option<FlashNotice>) -> Self {
        let fields = employee.editable_fields();
        Self::with_mode(FormMode::Edit { employee }, fields, flash)
    }

    fn with_mode(mode: FormMode, fields: EmployeeFields, flash: Option<FlashNotice>) -> Self {
        Self {
            mode,
            initial: fields.clone(),
            fields,
            errors: FieldErrors::new(),
            submitting: false,
            failure: None,
            flash: FlashNotice::non_empty(flash),
        }
    }

    /// Shows errors a form page arrived with.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &EmployeeFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_dirty(&self) -> bool {
        self.fields != self.initial
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.fields.gender = gender;
    }

    /// Text-input entry point; an empty gender clears the selection.
    pub fn set_field(&mut self, field: EditableField, value: &str) -> Result<(), ProtocolError> {
        match field {
            EditableField::Name => self.set_name(value),
            EditableField::Email => self.set_email(value),
            EditableField::Gender if value.trim().is_empty() => self.set_gender(None),
            EditableField::Gender => self.set_gender(Some(value.parse()?)),
        }
        Ok(())
    }

    /// Starts a submission carrying the fields verbatim. Returns `None`
    /// while one is already in flight.
    pub fn begin_submit(&mut self) -> Option<VisitRequest> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.failure = None;
        let fields = self.fields.clone();
        Some(match &self.mode {
            FormMode::Create => VisitRequest::store(fields),
            FormMode::Edit { employee } => VisitRequest::update(employee.id, fields),
        })
    }

    pub(crate) fn submission_succeeded(&mut self) {
        self.submitting = false;
        self.errors.clear();
        info!(target_id = ?self.employee_id(), "employee form accepted");
    }

    pub(crate) fn submission_rejected(&mut self, errors: FieldErrors) {
        self.submitting = false;
        self.errors = errors;
    }

    pub(crate) fn submission_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        let message = message.into();
        warn!(target_id = ?self.employee_id(), %message, "employee form submission failed");
        self.failure = Some(message);
    }

    /// Leaves without saving; nothing typed here has been persisted.
    pub fn cancel(&self) -> VisitRequest {
        VisitRequest::list()
    }

    fn employee_id(&self) -> Option<EmployeeId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { employee } => Some(employee.id),
        }
    }

    pub fn render(&self) -> FormRender {
        let (page_title, heading, description, idle_label, busy_label) = match &self.mode {
            FormMode::Create => (
                "Create Employee".to_string(),
                "Create Employee",
                "Add a new employee",
                "Create Employee",
                "Creating...",
            ),
            FormMode::Edit { employee } => (
                format!("Edit {}", employee.name),
                "Edit Employee",
                "Update employee information",
                "Update Employee",
                "Updating...",
            ),
        };

        let inputs = EditableField::ALL
            .into_iter()
            .map(|field| {
                let error = self.errors.get(field).map(str::to_string);
                FieldInput {
                    field,
                    label: field.label(),
                    kind: input_kind(field),
                    value: self.fields.value(field),
                    placeholder: placeholder(field),
                    invalid: error.is_some(),
                    error,
                }
            })
            .collect();

        FormRender {
            page_title,
            heading,
            description,
            banners: flash_banners(self.flash.as_ref()),
            failure: self.failure.clone(),
            inputs,
            submit: SubmitControl {
                label: if self.submitting { busy_label } else { idle_label },
                disabled: self.submitting,
            },
            cancel: Link::new("Cancel", employees_route()),
            back: Link::new("Back to Employees", employees_route()),
        }
    }
}

fn input_kind(field: EditableField) -> InputKind {
    match field {
        EditableField::Name => InputKind::Text,
        EditableField::Email => InputKind::Email,
        EditableField::Gender => InputKind::Select {
            options: Gender::ALL
                .into_iter()
                .map(|gender| SelectOption {
                    value: gender.as_str(),
                    label: gender.label(),
                })
                .collect(),
        },
    }
}

fn placeholder(field: EditableField) -> &'static str {
    match field {
        EditableField::Name => "Enter employee name",
        EditableField::Email => "Enter employee email",
        EditableField::Gender => "Select gender",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRender {
    pub page_title: String,
    pub heading: &'static str,
    pub description: &'static str,
    pub banners: Vec<FlashBanner>,
    /// Non-field failure from the last submission, if any.
    pub failure: Option<String>,
    pub inputs: Vec<FieldInput>,
    pub submit: SubmitControl,
    pub cancel: Link,
    pub back: Link,
}

impl FormRender {
    pub fn input(&self, field: EditableField) -> Option<&FieldInput> {
        self.inputs.iter().find(|input| input.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub field: EditableField,
    pub label: &'static str,
    pub kind: InputKind,
    pub value: String,
    pub placeholder: &'static str,
    /// Shown directly beneath the input.
    pub error: Option<String>,
    pub invalid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
