use chrono::FixedOffset;
use shared::protocol::{edit_employee_route, employees_route, Employee, EmployeeProps, FlashNotice};

use crate::render::{flash_banners, long_date_time, FlashBanner, Link};

/// Read-only projection of one employee.
#[derive(Debug, Clone)]
pub struct DetailView {
    employee: Employee,
    flash: Option<FlashNotice>,
    display_offset: FixedOffset,
}

impl DetailView {
    pub fn new(props: EmployeeProps, display_offset: FixedOffset) -> Self {
        Self {
            employee: props.employee,
            flash: FlashNotice::non_empty(props.flash),
            display_offset,
        }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn render(&self) -> DetailRender {
        let employee = &self.employee;
        DetailRender {
            page_title: employee.name.clone(),
            heading: "Employee Details".to_string(),
            description: "View employee information".to_string(),
            banners: flash_banners(self.flash.as_ref()),
            name: employee.name.clone(),
            email: employee.email.clone(),
            gender: employee.gender.label().to_string(),
            created_at: TimestampRender {
                label: "Created At",
                display: long_date_time(&employee.created_at, self.display_offset),
            },
            updated_at: TimestampRender {
                label: "Last Updated",
                display: long_date_time(&employee.updated_at, self.display_offset),
            },
            back: Link::new("Back to Employees", employees_route()),
            edit: Link::new("Edit Employee", edit_employee_route(employee.id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRender {
    pub page_title: String,
    pub heading: String,
    pub description: String,
    pub banners: Vec<FlashBanner>,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub created_at: TimestampRender,
    pub updated_at: TimestampRender,
    pub back: Link,
    pub edit: Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampRender {
    pub label: &'static str,
    pub display: String,
}

#[cfg(test)]
#[path = "tests/detail_view_tests.rs"]
mod tests;
