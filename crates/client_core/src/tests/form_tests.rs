use super::*;

use crate::endpoint::VisitMethod;

fn ada() -> Employee {
    Employee {
        id: EmployeeId(4),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        gender: Gender::Female,
        created_at: "2024-03-05T14:07:00Z".parse().expect("timestamp"),
        updated_at: "2024-03-05T14:07:00Z".parse().expect("timestamp"),
    }
}

#[test]
fn create_form_starts_empty_with_no_gender_selected() {
    let form = FormController::create(None);
    assert_eq!(form.fields(), &EmployeeFields::default());
    assert!(form.fields().gender.is_none());
    assert!(!form.is_dirty());

    let render = form.render();
    assert_eq!(render.heading, "Create Employee");
    assert_eq!(render.submit.label, "Create Employee");
    assert!(!render.submit.disabled);
    let gender = render.input(EditableField::Gender).expect("gender input");
    assert_eq!(gender.value, "");
    assert_eq!(gender.placeholder, "Select gender");
}

#[test]
fn edit_form_is_seeded_from_employee() {
    let form = FormController::edit(ada(), None);
    assert_eq!(form.fields().name, "Ada Lovelace");
    assert_eq!(form.fields().email, "ada@example.com");
    assert_eq!(form.fields().gender, Some(Gender::Female));

    let render = form.render();
    assert_eq!(render.page_title, "Edit Ada Lovelace");
    assert_eq!(render.submit.label, "Update Employee");
    assert_eq!(render.input(EditableField::Gender).expect("gender").value, "female");
}

#[test]
fn each_edit_touches_exactly_one_field() {
    let mut form = FormController::edit(ada(), None);
    form.set_field(EditableField::Email, "countess@example.com")
        .expect("email");
    assert_eq!(form.fields().email, "countess@example.com");
    assert_eq!(form.fields().name, "Ada Lovelace");
    assert_eq!(form.fields().gender, Some(Gender::Female));
    assert!(form.is_dirty());

    form.set_field(EditableField::Gender, "").expect("clear gender");
    assert_eq!(form.fields().gender, None);
    assert!(form.set_field(EditableField::Gender, "robot").is_err());
    assert_eq!(form.fields().gender, None);
}

#[test]
fn create_submits_post_with_fields_verbatim() {
    let mut form = FormController::create(None);
    form.set_name("  not trimmed ");
    form.set_email("not-an-email");

    let request = form.begin_submit().expect("request");
    assert_eq!(request.method, VisitMethod::Post);
    assert_eq!(request.path, "/employees");
    assert_eq!(
        request.body,
        Some(EmployeeFields {
            name: "  not trimmed ".to_string(),
            email: "not-an-email".to_string(),
            gender: None,
        })
    );
}

#[test]
fn edit_submits_put_to_resource_path() {
    let mut form = FormController::edit(ada(), None);
    let request = form.begin_submit().expect("request");
    assert_eq!(request.method, VisitMethod::Put);
    assert_eq!(request.path, "/employees/4");
}

#[test]
fn second_submit_while_in_flight_yields_nothing() {
    let mut form = FormController::edit(ada(), None);
    assert!(form.begin_submit().is_some());
    assert!(form.is_submitting());
    assert!(form.begin_submit().is_none());

    let render = form.render();
    assert!(render.submit.disabled);
    assert_eq!(render.submit.label, "Updating...");
}

#[test]
fn rejection_replaces_errors_and_preserves_input() {
    let mut form = FormController::create(None);
    form.set_name("Ada");
    form.begin_submit().expect("request");
    form.submission_rejected(
        [
            (EditableField::Name, "too short".to_string()),
            (EditableField::Email, "required".to_string()),
        ]
        .into_iter()
        .collect(),
    );

    form.begin_submit().expect("second request");
    form.submission_rejected(
        [(EditableField::Email, "has already been taken".to_string())]
            .into_iter()
            .collect(),
    );

    assert!(!form.is_submitting());
    assert_eq!(form.fields().name, "Ada");
    assert_eq!(form.errors().get(EditableField::Name), None);
    assert_eq!(
        form.errors().get(EditableField::Email),
        Some("has already been taken")
    );

    let render = form.render();
    let email = render.input(EditableField::Email).expect("email");
    assert!(email.invalid);
    assert_eq!(email.error.as_deref(), Some("has already been taken"));
    let name = render.input(EditableField::Name).expect("name");
    assert!(!name.invalid);
    assert!(name.error.is_none());
}

#[test]
fn typing_leaves_stale_errors_until_next_submit() {
    let mut form = FormController::create(None);
    form.begin_submit().expect("request");
    form.submission_rejected(
        [(EditableField::Email, "invalid".to_string())]
            .into_iter()
            .collect(),
    );

    form.set_email("ada@example.com");
    assert_eq!(form.errors().get(EditableField::Email), Some("invalid"));
}

#[test]
fn generic_failure_reenables_submit_and_keeps_fields() {
    let mut form = FormController::edit(ada(), None);
    form.set_name("Augusta Ada King");
    form.begin_submit().expect("request");
    form.submission_failed("Unable to reach the server. Please try again.");

    assert!(!form.is_submitting());
    assert_eq!(form.fields().name, "Augusta Ada King");
    let render = form.render();
    assert!(!render.submit.disabled);
    assert_eq!(
        render.failure.as_deref(),
        Some("Unable to reach the server. Please try again.")
    );

    form.begin_submit().expect("retry");
    assert!(form.failure().is_none());
}

#[test]
fn success_clears_errors() {
    let mut form = FormController::create(None);
    form.begin_submit().expect("request");
    form.submission_rejected(
        [(EditableField::Name, "required".to_string())]
            .into_iter()
            .collect(),
    );
    form.begin_submit().expect("request");
    form.submission_succeeded();
    assert!(form.errors().is_empty());
    assert!(!form.is_submitting());
}

#[test]
fn cancel_returns_to_list_without_confirmation() {
    let mut form = FormController::edit(ada(), None);
    form.set_name("discarded");
    let request = form.cancel();
    assert_eq!(request.method, VisitMethod::Get);
    assert_eq!(request.path, "/employees");
    assert_eq!(form.render().cancel.href, "/employees");
}
