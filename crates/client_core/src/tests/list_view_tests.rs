use super::*;

use chrono::{DateTime, Utc};
use shared::domain::Gender;

fn employee(id: i64, name: &str) -> Employee {
    let at: DateTime<Utc> = "2024-03-05T14:07:00Z".parse().expect("timestamp");
    Employee {
        id: EmployeeId(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        gender: if id % 2 == 0 { Gender::Male } else { Gender::Female },
        created_at: at,
        updated_at: at,
    }
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("offset")
}

fn list_of(employees: Vec<Employee>, flash: Option<FlashNotice>) -> ListView {
    ListView::new(IndexProps { employees, flash }, utc())
}

#[test]
fn renders_one_row_per_employee_in_server_order() {
    let view = list_of(
        vec![employee(3, "Grace"), employee(1, "Ada"), employee(2, "Alan")],
        None,
    );
    let render = view.render();
    let ListBody::Table { rows } = &render.body else {
        panic!("expected table");
    };
    assert_eq!(rows.len(), 3);
    let ids: Vec<i64> = rows.iter().map(|row| row.id.0).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(rows[0].gender, "Female");
    assert_eq!(rows[2].gender, "Male");
    assert_eq!(rows[0].created, "3/5/2024");
    assert_eq!(rows[1].view.href.as_deref(), Some("/employees/1"));
    assert_eq!(rows[1].edit.href.as_deref(), Some("/employees/1/edit"));
}

#[test]
fn empty_collection_renders_call_to_action() {
    let render = list_of(Vec::new(), None).render();
    match render.body {
        ListBody::Empty { call_to_action, .. } => {
            assert_eq!(call_to_action.href, "/employees/create");
        }
        ListBody::Table { .. } => panic!("empty list must not render a table"),
    }
    assert_eq!(render.add_employee.href, "/employees/create");
}

#[test]
fn declining_confirmation_leaves_state_untouched() {
    let mut view = list_of(vec![employee(1, "Ada"), employee(2, "Alan")], None);
    let before = view.render();

    let prompt = view
        .request_delete(EmployeeId(1))
        .expect("known employee")
        .expect("prompt");
    assert_eq!(prompt.message, DELETE_CONFIRMATION);
    assert_eq!(view.delete_state(EmployeeId(1)), RowDeleteState::ConfirmPending);

    view.decline_delete();

    assert_eq!(view.delete_state(EmployeeId(1)), RowDeleteState::Idle);
    assert_eq!(view.render(), before);
}

#[test]
fn confirming_issues_delete_without_removing_row() {
    let mut view = list_of(vec![employee(1, "Ada"), employee(2, "Alan")], None);
    view.request_delete(EmployeeId(1)).expect("known").expect("prompt");

    let (id, request) = view.confirm_delete().expect("pending confirmation");
    assert_eq!(id, EmployeeId(1));
    assert_eq!(request.method, crate::endpoint::VisitMethod::Delete);
    assert_eq!(request.path, "/employees/1");
    assert!(request.preserve_scroll);

    assert_eq!(view.delete_state(EmployeeId(1)), RowDeleteState::RequestInFlight);
    let render = view.render();
    assert_eq!(render.body.row_count(), 2);
    assert!(render.confirmation.is_none());
}

#[test]
fn in_flight_delete_disables_only_its_own_row() {
    let mut view = list_of(vec![employee(1, "Ada"), employee(2, "Alan")], None);
    view.request_delete(EmployeeId(1)).expect("known").expect("prompt");
    view.confirm_delete().expect("pending");

    let render = view.render();
    let ListBody::Table { rows } = &render.body else {
        panic!("expected table");
    };
    assert!(!rows[0].delete.enabled);
    assert!(rows[0].view.enabled && rows[0].edit.enabled);
    assert!(rows[1].delete.enabled && rows[1].view.enabled && rows[1].edit.enabled);

    assert!(view.request_delete(EmployeeId(1)).expect("known").is_none());
    assert!(view.request_delete(EmployeeId(2)).expect("known").is_some());
}

#[test]
fn confirm_without_prompt_is_a_no_op() {
    let mut view = list_of(vec![employee(1, "Ada")], None);
    assert!(view.confirm_delete().is_none());
    assert_eq!(view.delete_state(EmployeeId(1)), RowDeleteState::Idle);
}

#[test]
fn unknown_employee_cannot_be_deleted() {
    let mut view = list_of(vec![employee(1, "Ada")], None);
    let err = view.request_delete(EmployeeId(9)).expect_err("unknown id");
    assert!(matches!(err, SessionError::UnknownEmployee(EmployeeId(9))));
}

#[test]
fn failed_delete_keeps_row_and_shows_error_flash() {
    let mut view = list_of(
        vec![employee(1, "Ada")],
        Some(FlashNotice::success("Employee updated successfully.")),
    );
    view.request_delete(EmployeeId(1)).expect("known").expect("prompt");
    view.confirm_delete().expect("pending");

    view.delete_failed(EmployeeId(1), "Unable to reach the server. Please try again.");

    assert_eq!(view.delete_state(EmployeeId(1)), RowDeleteState::Idle);
    let render = view.render();
    assert_eq!(render.body.row_count(), 1);
    let messages: Vec<&str> = render.banners.iter().map(|b| b.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Employee updated successfully.",
            "Unable to reach the server. Please try again."
        ]
    );
    assert_eq!(render.banners[1].kind, crate::render::FlashKind::Error);
}

#[test]
fn empty_flash_renders_no_banner() {
    let view = list_of(vec![employee(1, "Ada")], Some(FlashNotice::default()));
    assert!(view.flash().is_none());
    assert!(view.render().banners.is_empty());
}
