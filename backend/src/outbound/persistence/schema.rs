//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Account profiles.
    ///
    /// Credentials live with the identity provider; this table only holds
    /// what `GET /users/me` returns.
    users (id) {
        /// Primary key.
        id -> Uuid,
        /// Display name, never blank.
        name -> Text,
        /// Lower-cased contact address, unique across users.
        email -> Text,
        /// Link to an uploaded resume.
        resume_url -> Nullable<Text>,
        /// One-line professional summary.
        headline -> Nullable<Text>,
        /// Up to three short goals.
        daily_focus -> Array<Text>,
        /// Job search preferences document.
        preferences -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job applications, one row per record.
    ///
    /// `status`, `priority` and `work_mode` are text columns constrained to
    /// their value sets by CHECK constraints.
    applications (id) {
        /// Primary key.
        id -> Uuid,
        /// User that created the record.
        owner_id -> Uuid,
        /// Hiring company.
        company -> Text,
        /// Job title.
        role -> Text,
        /// Pipeline stage.
        status -> Text,
        /// User-assigned priority.
        priority -> Text,
        /// Working arrangement.
        work_mode -> Text,
        /// Where the posting was found.
        source -> Nullable<Text>,
        /// Advertised salary, free text.
        salary_range -> Nullable<Text>,
        /// Office location.
        location -> Nullable<Text>,
        /// Free-form notes.
        notes -> Nullable<Text>,
        /// Date the application was sent.
        applied_date -> Nullable<Date>,
        /// Next scheduled interview.
        next_interview_date -> Nullable<Date>,
        /// Date to chase a response.
        follow_up_date -> Nullable<Date>,
        /// Ordered contact list.
        contacts -> Jsonb,
        /// Ordered link list.
        links -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
