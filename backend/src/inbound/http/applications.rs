//! Job application handlers.
//!
//! ```text
//! POST   /api/v1/apps
//! GET    /api/v1/apps?status=Interview&company=acme&page=2&limit=10
//! GET    /api/v1/apps/{id}
//! PUT    /api/v1/apps/{id}
//! DELETE /api/v1/apps/{id}
//! ```
//!
//! Every route requires a session and only ever sees the caller's records.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;

use crate::domain::Error;
use crate::domain::applications::{
    Application, ApplicationId, ApplicationListQuery, ApplicationPayload,
};
use crate::domain::ports::DeleteApplicationResponse;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ApplicationPageSchema, ApplicationPayloadSchema, ApplicationSchema,
    DeleteApplicationResponseSchema, ErrorSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Ids that do not parse cannot name a stored record.
fn parse_id(raw: &str) -> Result<ApplicationId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("Application not found"))
}

/// Create an application owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/apps",
    request_body = ApplicationPayloadSchema,
    responses(
        (status = 201, description = "Created", body = ApplicationSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "createApplication"
)]
#[post("/apps")]
pub async fn create_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApplicationPayload>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let record = state.applications.create(&owner, &payload).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Filtered, paginated list of the caller's applications, most recently
/// updated first.
#[utoipa::path(
    get,
    path = "/api/v1/apps",
    params(
        ("status" = Option<String>, Query, description = "Exact status"),
        ("company" = Option<String>, Query, description = "Case-insensitive company substring"),
        ("search" = Option<String>, Query, description = "Case-insensitive company or role substring"),
        ("from" = Option<String>, Query, description = "Earliest applied date, inclusive"),
        ("to" = Option<String>, Query, description = "Latest applied date, inclusive"),
        ("page" = Option<String>, Query, description = "One-based page, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 20, at most 100")
    ),
    responses(
        (status = 200, description = "Page of applications", body = ApplicationPageSchema),
        (status = 400, description = "Invalid date bound", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/apps")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ApplicationListQuery>,
) -> ApiResult<web::Json<Page<Application>>> {
    let owner = session.require_user_id()?;
    let page = state.applications_query.list(&owner, &query).await?;
    Ok(web::Json(page))
}

/// One of the caller's applications.
#[utoipa::path(
    get,
    path = "/api/v1/apps/{id}",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application", body = ApplicationSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/apps/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Application>> {
    let owner = session.require_user_id()?;
    let id = parse_id(&path)?;
    let record = state.applications_query.get(&owner, &id).await?;
    Ok(web::Json(record))
}

/// Apply the keys present in the body to one of the caller's applications.
#[utoipa::path(
    put,
    path = "/api/v1/apps/{id}",
    params(("id" = String, Path, description = "Application id")),
    request_body = ApplicationPayloadSchema,
    responses(
        (status = 200, description = "Updated application", body = ApplicationSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "updateApplication"
)]
#[put("/apps/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApplicationPayload>,
) -> ApiResult<web::Json<Application>> {
    let owner = session.require_user_id()?;
    let id = parse_id(&path)?;
    let record = state.applications.update(&owner, &id, &payload).await?;
    Ok(web::Json(record))
}

/// Remove one of the caller's applications.
#[utoipa::path(
    delete,
    path = "/api/v1/apps/{id}",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteApplicationResponseSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/apps/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteApplicationResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_id(&path)?;
    let response = state.applications.delete(&owner, &id).await?;
    Ok(web::Json(response))
}

/// Register the application routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_application)
        .service(list_applications)
        .service(get_application)
        .service(update_application)
        .service(delete_application);
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
