use super::*;

use shared::{
    domain::{EmployeeId, Gender},
    error::FieldErrors,
};

fn props() -> EmployeeProps {
    EmployeeProps {
        employee: Employee {
            id: EmployeeId(7),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            gender: Gender::Female,
            created_at: "2024-03-05T14:07:00.000000Z".parse().expect("timestamp"),
            updated_at: "2024-12-25T09:30:00Z".parse().expect("timestamp"),
        },
        flash: None,
        errors: FieldErrors::default(),
    }
}

#[test]
fn renders_timestamps_as_readable_date_and_time() {
    let render = DetailView::new(props(), FixedOffset::east_opt(0).expect("offset")).render();

    assert_eq!(render.created_at.label, "Created At");
    assert_eq!(render.created_at.display, "March 5, 2024 at 02:07 PM");
    assert_eq!(render.updated_at.label, "Last Updated");
    assert_eq!(render.updated_at.display, "December 25, 2024 at 09:30 AM");
    assert_ne!(render.created_at.display, render.updated_at.display);
    assert!(!render.created_at.display.contains('T'));
}

#[test]
fn applies_display_offset() {
    let offset = FixedOffset::west_opt(5 * 3600).expect("offset");
    let render = DetailView::new(props(), offset).render();
    assert_eq!(render.created_at.display, "March 5, 2024 at 09:07 AM");
}

#[test]
fn links_back_to_list_and_forward_to_edit() {
    let render = DetailView::new(props(), FixedOffset::east_opt(0).expect("offset")).render();
    assert_eq!(render.page_title, "Ada Lovelace");
    assert_eq!(render.gender, "Female");
    assert_eq!(render.back.href, "/employees");
    assert_eq!(render.edit.href, "/employees/7/edit");
}

#[test]
fn rendering_is_deterministic() {
    let view = DetailView::new(props(), FixedOffset::east_opt(0).expect("offset"));
    assert_eq!(view.render(), view.render());
}
