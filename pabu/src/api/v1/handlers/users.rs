//! v1 User handlers.
//!
//! Upsert is the only write path: profile fields are caller-supplied, but the
//! access role is re-derived from the configured email directory on every
//! call so a directory change wins over stale stored roles.

use axum::extract::{Path, State};
use chrono::Utc;
use validator::Validate;

use crate::api::v1::dto::users::{ListUsersResponse, UpsertUserRequest, UserResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{Role, User};

/// `PUT /api/v1/users/{userId}`
#[utoipa::path(
    put,
    path = "/api/v1/users/{userId}",
    tag = "users",
    operation_id = "users.upsert",
    params(("userId" = String, Path, description = "User id")),
    request_body = UpsertUserRequest,
    responses(
        (status = 200, description = "Upserted user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(req): axum::Json<UpsertUserRequest>,
) -> ApiResponse<UserResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }

    let existing = match state.db.get_user(&id).await {
        Ok(user) => user,
        Err(error) => return ApiResponse::from_error(&error),
    };

    let created_at = existing
        .as_ref()
        .map(|u| u.created_at)
        .unwrap_or_else(Utc::now);

    // Directory entry wins; request role applies only for unlisted emails.
    let role = state
        .config
        .roles
        .get(&req.email.to_lowercase())
        .copied()
        .or(req.role)
        .unwrap_or(Role::Employee);

    let user = User {
        id: id.clone(),
        email: req.email,
        name: req.name,
        employee_id: req.employee_id,
        department: req.department.unwrap_or_default(),
        position: req.position.unwrap_or_default(),
        manager_id: req.manager_id,
        role,
        language: req.language.unwrap_or_else(|| "en".to_string()),
        phone: req.phone,
        site: req.site,
        projects: req.projects.unwrap_or_default(),
        status: req.status.unwrap_or_default(),
        join_date: req.join_date.unwrap_or(created_at),
        created_at,
        updated_at: Utc::now(),
    };

    match state.db.upsert_user(&user).await {
        Ok(()) => ApiResponse::success(user.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/users/{userId}`
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}",
    tag = "users",
    operation_id = "users.get",
    params(("userId" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<UserResponse> {
    match state.db.get_user(&id).await {
        Ok(Some(user)) => ApiResponse::success(user.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("User {id} not found")),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/users/{userId}/reports`
///
/// Direct reports only, ordered by employee id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/reports",
    tag = "users",
    operation_id = "users.reports",
    params(("userId" = String, Path, description = "Manager user id")),
    responses(
        (status = 200, description = "Direct reports", body = ListUsersResponse),
    )
)]
pub async fn get_direct_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<ListUsersResponse> {
    match state.db.get_direct_reports(&id).await {
        Ok(reports) => ApiResponse::success(ListUsersResponse {
            users: reports.into_iter().map(UserResponse::from).collect(),
        }),
        Err(error) => ApiResponse::from_error(&error),
    }
}
