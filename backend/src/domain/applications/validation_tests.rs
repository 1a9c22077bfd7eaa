//! Tests for the application write rules.

use super::*;
use rstest::rstest;
use serde_json::{json, Value};

fn payload(body: Value) -> ApplicationPayload {
    serde_json::from_value(body).expect("payload shape")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[rstest]
#[case(json!({}), None)]
#[case(json!({ "status": "Offer" }), None)]
#[case(json!({ "status": "" }), None)]
#[case(json!({ "status": "Hired" }), Some(ApplicationValidationError::InvalidStatus))]
#[case(json!({ "status": 3 }), Some(ApplicationValidationError::InvalidStatus))]
#[case(json!({ "priority": "Urgent" }), Some(ApplicationValidationError::InvalidPriority))]
#[case(json!({ "workMode": "remote" }), Some(ApplicationValidationError::InvalidWorkMode))]
#[case(json!({ "appliedDate": "" }), None)]
#[case(json!({ "appliedDate": "2024-13-01" }), Some(ApplicationValidationError::InvalidAppliedDate))]
#[case(
    json!({ "nextInterviewDate": "soon" }),
    Some(ApplicationValidationError::InvalidNextInterviewDate)
)]
#[case(json!({ "followUpDate": "tomorrow" }), Some(ApplicationValidationError::InvalidFollowUpDate))]
#[case(json!({ "company": "  " }), Some(ApplicationValidationError::MissingCompanyOrRole))]
#[case(json!({ "role": null }), Some(ApplicationValidationError::MissingCompanyOrRole))]
fn gate_reports_first_broken_rule(
    #[case] body: Value,
    #[case] expected: Option<ApplicationValidationError>,
) {
    assert_eq!(validate(&payload(body)), expected);
}

#[rstest]
fn status_is_checked_before_dates() {
    let body = payload(json!({ "status": "Hired", "appliedDate": "never" }));
    assert_eq!(validate(&body), Some(ApplicationValidationError::InvalidStatus));
}

#[rstest]
fn dates_are_checked_in_declared_order() {
    let body = payload(json!({
        "followUpDate": "x",
        "nextInterviewDate": "y",
        "appliedDate": "2024-01-01",
    }));
    assert_eq!(
        validate(&body),
        Some(ApplicationValidationError::InvalidNextInterviewDate)
    );
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "company": "Acme" }))]
#[case(json!({ "company": "Acme", "role": "   " }))]
#[case(json!({ "role": "Engineer", "status": "Hired" }))]
fn create_requires_company_and_role_first(#[case] body: Value) {
    assert_eq!(
        validate_new(&payload(body)),
        Err(ApplicationValidationError::MissingCompanyOrRole)
    );
}

#[rstest]
fn create_applies_defaults_and_trims() {
    let fields = validate_new(&payload(json!({
        "company": "  Acme ",
        "role": "Engineer",
        "notes": "   ",
        "location": " Berlin ",
        "appliedDate": "2024-03-01",
        "contacts": [{ "name": " Jo ", "email": "" }],
        "owner": "00000000-0000-0000-0000-000000000000",
    })))
    .expect("valid body");

    assert_eq!(fields.company, "Acme");
    assert_eq!(fields.status, ApplicationStatus::Applied);
    assert_eq!(fields.priority, Priority::Medium);
    assert_eq!(fields.work_mode, WorkMode::Remote);
    assert_eq!(fields.notes, None);
    assert_eq!(fields.location.as_deref(), Some("Berlin"));
    assert_eq!(fields.applied_date, Some(date(2024, 3, 1)));
    assert_eq!(fields.contacts.len(), 1);
    assert_eq!(fields.contacts.first().and_then(|c| c.name.as_deref()), Some("Jo"));
    assert_eq!(fields.contacts.first().and_then(|c| c.email.as_deref()), None);
}

#[rstest]
fn update_touches_only_provided_keys() {
    let mut fields = ApplicationFields::new("Acme", "Engineer");
    fields.notes = Some("keep me".to_owned());
    fields.location = Some("Berlin".to_owned());
    fields.applied_date = Some(date(2024, 1, 1));
    fields.links = vec![Link {
        label: Some("Posting".to_owned()),
        url: None,
    }];

    let changes = validate_update(&payload(json!({
        "status": "Interview",
        "location": null,
        "appliedDate": "",
        "links": [],
    })))
    .expect("valid update");
    changes.apply_to(&mut fields);

    assert_eq!(fields.status, ApplicationStatus::Interview);
    assert_eq!(fields.company, "Acme");
    assert_eq!(fields.notes.as_deref(), Some("keep me"));
    assert_eq!(fields.location, None);
    assert_eq!(fields.applied_date, None);
    assert!(fields.links.is_empty());
}

#[rstest]
fn null_enum_resets_to_default() {
    let mut fields = ApplicationFields::new("Acme", "Engineer");
    fields.priority = Priority::High;
    validate_update(&payload(json!({ "priority": null })))
        .expect("valid update")
        .apply_to(&mut fields);
    assert_eq!(fields.priority, Priority::Medium);
}

#[rstest]
#[case("2024-03-01", Some(date(2024, 3, 1)))]
#[case("2024-03-01T10:00:00Z", Some(date(2024, 3, 1)))]
#[case("2024-03-01T23:00:00-05:00", Some(date(2024, 3, 2)))]
#[case("2024-03-01T10:00:00", Some(date(2024, 3, 1)))]
#[case("2024-03-01T23:59:59.250", Some(date(2024, 3, 1)))]
#[case("2024-02-30T10:00:00", None)]
#[case("2024-02-30", None)]
#[case("03/01/2024", None)]
fn calendar_date_forms(#[case] raw: &str, #[case] expected: Option<NaiveDate>) {
    assert_eq!(parse_calendar_date(raw), expected);
}

#[rstest]
fn errors_expose_field_and_code() {
    let err = ApplicationValidationError::InvalidFollowUpDate;
    assert_eq!(err.field(), "followUpDate");
    assert_eq!(err.code(), "invalid_date");
    assert_eq!(err.to_string(), "Invalid follow-up date");
}
