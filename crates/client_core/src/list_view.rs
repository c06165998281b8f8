use std::collections::BTreeSet;

use chrono::FixedOffset;
use shared::{
    domain::EmployeeId,
    protocol::{
        create_employee_route, edit_employee_route, employee_route, Employee, FlashNotice,
        IndexProps,
    },
};
use tracing::info;

use crate::{
    endpoint::VisitRequest,
    error::SessionError,
    render::{flash_banners, short_date, FlashBanner, Link},
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this employee?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDeleteState {
    Idle,
    ConfirmPending,
    RequestInFlight,
}

/// The question a front end must put to the user before a delete goes out.
/// Answer with [`ListView::confirm_delete`] or [`ListView::decline_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub employee_id: EmployeeId,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct ListView {
    employees: Vec<Employee>,
    flash: Option<FlashNotice>,
    confirming: Option<EmployeeId>,
    deleting: BTreeSet<EmployeeId>,
    display_offset: FixedOffset,
}

impl ListView {
    pub fn new(props: IndexProps, display_offset: FixedOffset) -> Self {
        Self {
            employees: props.employees,
            flash: FlashNotice::non_empty(props.flash),
            confirming: None,
            deleting: BTreeSet::new(),
            display_offset,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn flash(&self) -> Option<&FlashNotice> {
        self.flash.as_ref()
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmationPrompt> {
        self.confirming.map(prompt_for)
    }

    pub fn delete_state(&self, id: EmployeeId) -> RowDeleteState {
        if self.deleting.contains(&id) {
            RowDeleteState::RequestInFlight
        } else if self.confirming == Some(id) {
            RowDeleteState::ConfirmPending
        } else {
            RowDeleteState::Idle
        }
    }

    /// Idle -> ConfirmPending. Returns `None` while that row's delete is
    /// already in flight, since its control is disabled.
    pub fn request_delete(
        &mut self,
        id: EmployeeId,
    ) -> Result<Option<ConfirmationPrompt>, SessionError> {
        if !self.employees.iter().any(|employee| employee.id == id) {
            return Err(SessionError::UnknownEmployee(id));
        }
        if self.deleting.contains(&id) {
            return Ok(None);
        }
        self.confirming = Some(id);
        Ok(Some(prompt_for(id)))
    }

    /// ConfirmPending -> Idle with no other effect.
    pub fn decline_delete(&mut self) {
        self.confirming = None;
    }

    /// ConfirmPending -> RequestInFlight, yielding the DELETE to dispatch.
    /// The row stays listed until the server's refreshed list arrives.
    pub fn confirm_delete(&mut self) -> Option<(EmployeeId, VisitRequest)> {
        let id = self.confirming.take()?;
        self.deleting.insert(id);
        info!(employee_id = id.0, "delete confirmed");
        Some((id, VisitRequest::destroy(id)))
    }

    /// RequestInFlight -> Idle after a failed exchange. The failure is shown
    /// as an error flash on this view only.
    pub fn delete_failed(&mut self, id: EmployeeId, message: impl Into<String>) {
        self.deleting.remove(&id);
        let message = message.into();
        match self.flash.as_mut() {
            Some(flash) => flash.error = Some(message),
            None => self.flash = Some(FlashNotice::error(message)),
        }
    }

    pub fn render(&self) -> ListRender {
        let body = if self.employees.is_empty() {
            ListBody::Empty {
                message: "No employees found.".to_string(),
                call_to_action: Link::new("Add your first employee", create_employee_route()),
            }
        } else {
            ListBody::Table {
                rows: self.employees.iter().map(|e| self.render_row(e)).collect(),
            }
        };

        ListRender {
            page_title: "Employees".to_string(),
            heading: "Employee Management".to_string(),
            description: "Manage your employees list".to_string(),
            banners: flash_banners(self.flash.as_ref()),
            add_employee: Link::new("Add Employee", create_employee_route()),
            body,
            confirmation: self.pending_confirmation(),
        }
    }

    fn render_row(&self, employee: &Employee) -> ListRow {
        let delete_enabled = !self.deleting.contains(&employee.id);
        ListRow {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            gender: employee.gender.label().to_string(),
            created: short_date(&employee.created_at, self.display_offset),
            view: RowAction {
                href: Some(employee_route(employee.id)),
                enabled: true,
            },
            edit: RowAction {
                href: Some(edit_employee_route(employee.id)),
                enabled: true,
            },
            delete: RowAction {
                href: None,
                enabled: delete_enabled,
            },
        }
    }
}

fn prompt_for(employee_id: EmployeeId) -> ConfirmationPrompt {
    ConfirmationPrompt {
        employee_id,
        message: DELETE_CONFIRMATION,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRender {
    pub page_title: String,
    pub heading: String,
    pub description: String,
    pub banners: Vec<FlashBanner>,
    pub add_employee: Link,
    pub body: ListBody,
    pub confirmation: Option<ConfirmationPrompt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Empty { message: String, call_to_action: Link },
    Table { rows: Vec<ListRow> },
}

impl ListBody {
    pub fn row_count(&self) -> usize {
        match self {
            ListBody::Empty { .. } => 0,
            ListBody::Table { rows } => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub created: String,
    pub view: RowAction,
    pub edit: RowAction,
    pub delete: RowAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub href: Option<String>,
    pub enabled: bool,
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
