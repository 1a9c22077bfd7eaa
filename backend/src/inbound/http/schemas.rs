//! OpenAPI schemas for domain types.
//!
//! Domain types stay free of `utoipa`; the wrappers here describe their JSON
//! shape and are registered under the domain type names.

#![expect(
    dead_code,
    reason = "schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The resource does not exist or is not visible to the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server failure; the message is always generic.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error response body.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Machine-readable category.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Invalid status value")]
    message: String,
    /// Correlation id, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// `{ field, code }` for validation failures.
    #[schema(value_type = Option<Object>)]
    details: Option<serde_json::Value>,
}

/// Pipeline stage.
#[derive(ToSchema)]
#[schema(as = ApplicationStatus)]
pub enum ApplicationStatusSchema {
    /// Submitted, awaiting a response.
    Applied,
    /// Interviews in progress.
    Interview,
    /// Offer received.
    Offer,
    /// Closed without an offer.
    Rejected,
}

/// Follow-up priority.
#[derive(ToSchema)]
#[schema(as = Priority)]
pub enum PrioritySchema {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

/// Where the role is performed.
#[derive(ToSchema)]
#[schema(as = WorkMode)]
pub enum WorkModeSchema {
    /// Fully remote.
    Remote,
    /// Part remote.
    Hybrid,
    /// On site.
    Onsite,
}

/// Person connected to an application.
#[derive(ToSchema)]
#[schema(as = Contact)]
pub struct ContactSchema {
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    phone: Option<String>,
}

/// Labelled URL attached to an application.
#[derive(ToSchema)]
#[schema(as = Link)]
pub struct LinkSchema {
    label: Option<String>,
    url: Option<String>,
}

/// Stored job application.
#[derive(ToSchema)]
#[schema(as = Application)]
#[schema(rename_all = "camelCase")]
pub struct ApplicationSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Id of the user that created the record.
    #[schema(value_type = String, format = Uuid)]
    owner: String,
    #[schema(example = "Acme")]
    company: String,
    #[schema(example = "Backend Engineer")]
    role: String,
    status: ApplicationStatusSchema,
    priority: PrioritySchema,
    work_mode: WorkModeSchema,
    source: Option<String>,
    salary_range: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    applied_date: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    next_interview_date: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    follow_up_date: Option<String>,
    contacts: Vec<ContactSchema>,
    links: Vec<LinkSchema>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// Create/update body. Absent keys are left alone; `null` clears.
#[derive(ToSchema)]
#[schema(as = ApplicationPayload)]
#[schema(rename_all = "camelCase")]
pub struct ApplicationPayloadSchema {
    /// Required on create.
    company: Option<String>,
    /// Required on create.
    role: Option<String>,
    status: Option<ApplicationStatusSchema>,
    priority: Option<PrioritySchema>,
    work_mode: Option<WorkModeSchema>,
    source: Option<String>,
    salary_range: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    applied_date: Option<String>,
    next_interview_date: Option<String>,
    follow_up_date: Option<String>,
    contacts: Option<Vec<ContactSchema>>,
    links: Option<Vec<LinkSchema>>,
}

/// One page of applications.
#[derive(ToSchema)]
#[schema(as = ApplicationPage)]
#[schema(rename_all = "camelCase")]
pub struct ApplicationPageSchema {
    items: Vec<ApplicationSchema>,
    #[schema(example = 1)]
    page: u32,
    #[schema(example = 3)]
    total_pages: u64,
    #[schema(example = 45)]
    total: u64,
}

/// Body of a successful delete.
#[derive(ToSchema)]
#[schema(as = DeleteApplicationResponse)]
pub struct DeleteApplicationResponseSchema {
    #[schema(example = "Application deleted")]
    message: String,
}

/// Reminder toggles.
#[derive(ToSchema)]
#[schema(as = NotificationPreferences)]
#[schema(rename_all = "camelCase")]
pub struct NotificationPreferencesSchema {
    weekly_digest: bool,
    interview_reminders: bool,
    application_reminders: bool,
}

/// Visibility toggles.
#[derive(ToSchema)]
#[schema(as = PrivacyPreferences)]
#[schema(rename_all = "camelCase")]
pub struct PrivacyPreferencesSchema {
    public_profile: bool,
    monthly_export: bool,
}

/// Profile preferences.
#[derive(ToSchema)]
#[schema(as = UserPreferences)]
#[schema(rename_all = "camelCase")]
pub struct UserPreferencesSchema {
    work_mode_default: Option<String>,
    target_salary: Option<String>,
    notifications: NotificationPreferencesSchema,
    privacy: PrivacyPreferencesSchema,
}

/// The caller's profile. Never carries credential material.
#[derive(ToSchema)]
#[schema(as = UserProfile)]
#[schema(rename_all = "camelCase")]
pub struct UserProfileSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    resume_url: Option<String>,
    headline: Option<String>,
    /// At most three items.
    daily_focus: Vec<String>,
    preferences: UserPreferencesSchema,
}

/// Writable profile keys; anything else is ignored.
#[derive(ToSchema)]
#[schema(as = ProfilePatch)]
#[schema(rename_all = "camelCase")]
pub struct ProfilePatchSchema {
    name: Option<String>,
    email: Option<String>,
    headline: Option<String>,
    daily_focus: Option<Vec<String>>,
    preferences: Option<UserPreferencesSchema>,
}
