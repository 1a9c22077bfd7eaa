//! Tests for user identity and profile updates.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn profile() -> UserProfile {
    UserProfile {
        id: UserId::new("123e4567-e89b-12d3-a456-426614174000").expect("fixture id"),
        name: "Ada Lovelace".to_owned(),
        email: Email::new("ada@example.com").expect("fixture email"),
        resume_url: None,
        headline: Some("Analyst".to_owned()),
        daily_focus: vec!["Apply to two roles".to_owned()],
        preferences: UserPreferences::default(),
    }
}

fn update_from(body: serde_json::Value) -> Result<ProfileUpdate, UserValidationError> {
    let payload: ProfilePatchPayload = serde_json::from_value(body).expect("payload shape");
    ProfileUpdate::try_from_payload(payload)
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 123e4567-e89b-12d3-a456-426614174000", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_from_uuid_matches_string_form() {
    let id = UserId::random();
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("ada@example.com", true)]
#[case("  ADA@Example.com ", true)]
#[case("ada@example", false)]
#[case("ada example@x.io", false)]
#[case("", false)]
fn email_validation(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(Email::new(raw).is_ok(), valid);
}

#[rstest]
fn preferences_default_notifications_on_and_privacy_off() {
    let prefs: UserPreferences = serde_json::from_value(json!({})).expect("empty prefs");
    assert!(prefs.notifications.weekly_digest);
    assert!(prefs.notifications.application_reminders);
    assert!(!prefs.privacy.public_profile);
    assert!(!prefs.privacy.monthly_export);
}

#[rstest]
fn profile_serialises_camel_case() {
    let value = serde_json::to_value(profile()).expect("profile serialises");
    assert_eq!(value["dailyFocus"], json!(["Apply to two roles"]));
    assert_eq!(value["preferences"]["notifications"]["weeklyDigest"], json!(true));
    assert!(value.get("password").is_none());
}

#[rstest]
#[case(json!({ "name": "  " }), UserValidationError::EmptyName)]
#[case(json!({ "name": null }), UserValidationError::EmptyName)]
#[case(json!({ "email": "nope" }), UserValidationError::InvalidEmail)]
#[case(
    json!({ "dailyFocus": ["a", "b", "c", "d"] }),
    UserValidationError::TooManyFocusItems { max: 3 }
)]
fn invalid_updates_are_rejected(
    #[case] body: serde_json::Value,
    #[case] expected: UserValidationError,
) {
    assert_eq!(update_from(body), Err(expected));
}

#[rstest]
fn blank_focus_items_do_not_count_towards_limit() {
    let update = update_from(json!({ "dailyFocus": ["a", " ", "b", "", "c"] }))
        .expect("three real items");
    assert_eq!(
        update.daily_focus,
        Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
    );
}

#[rstest]
fn unknown_keys_are_ignored() {
    let update = update_from(json!({ "password": "x", "resumeUrl": "http://x" }))
        .expect("ignored keys");
    assert!(update.is_empty());
}

#[rstest]
fn apply_to_changes_only_provided_fields(mut profile: UserProfile) {
    let update = update_from(json!({
        "email": "Grace@Example.com",
        "headline": null,
        "preferences": { "targetSalary": "  90k ", "privacy": { "publicProfile": true } }
    }))
    .expect("valid update");

    update.apply_to(&mut profile);

    assert_eq!(profile.name, "Ada Lovelace");
    assert_eq!(profile.email.as_ref(), "grace@example.com");
    assert_eq!(profile.headline, None);
    assert_eq!(profile.daily_focus, vec!["Apply to two roles".to_owned()]);
    assert_eq!(profile.preferences.target_salary.as_deref(), Some("90k"));
    assert!(profile.preferences.privacy.public_profile);
    assert!(profile.preferences.notifications.interview_reminders);
}
