//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint plus the schema wrappers from
//! [`crate::inbound::http::schemas`], which describe domain types without
//! deriving utoipa traits on them. The document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{
    ApplicationPageSchema, ApplicationPayloadSchema, ApplicationSchema, ApplicationStatusSchema,
    ContactSchema, DeleteApplicationResponseSchema, ErrorCodeSchema, ErrorSchema, LinkSchema,
    NotificationPreferencesSchema, PrioritySchema, PrivacyPreferencesSchema, ProfilePatchSchema,
    UserPreferencesSchema, UserProfileSchema, WorkModeSchema,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Application tracker API",
        description = "Owner-scoped job application records, the signed-in user's profile and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::applications::create_application,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        ApplicationSchema,
        ApplicationPayloadSchema,
        ApplicationPageSchema,
        ApplicationStatusSchema,
        PrioritySchema,
        WorkModeSchema,
        ContactSchema,
        LinkSchema,
        DeleteApplicationResponseSchema,
        UserProfileSchema,
        ProfilePatchSchema,
        UserPreferencesSchema,
        NotificationPreferencesSchema,
        PrivacyPreferencesSchema,
    )),
    tags(
        (name = "applications", description = "Owner-scoped job application records"),
        (name = "users", description = "Session and profile of the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's shape.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "traceId")]
    #[case("Application", "workMode")]
    #[case("Application", "nextInterviewDate")]
    #[case("ApplicationPage", "totalPages")]
    #[case("UserProfile", "dailyFocus")]
    fn schemas_use_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).unwrap_or_else(|| panic!("{schema} schema"));
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/v1/apps")]
    #[case("/api/v1/apps/{id}")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/login")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
