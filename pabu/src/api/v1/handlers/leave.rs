//! v1 Leave handlers.
//!
//! Balances read with documented defaults when absent; applications follow
//! the pending → approved/rejected/cancelled state machine enforced by the
//! model layer.

use axum::extract::{Path, Query, State};
use chrono::Utc;
use validator::Validate;

use crate::api::v1::dto::leave::{
    CreateLeaveApplicationRequest, DecideLeaveApplicationRequest, LeaveApplicationResponse,
    LeaveBalanceResponse, ListLeaveApplicationsQuery, ListLeaveApplicationsResponse,
    PutLeaveBalanceRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{LeaveApplication, LeaveBalance, LeaveStatus};

const DEFAULT_LIST_LIMIT: u32 = 50;

/// `GET /api/v1/leave/balances/{employeeId}`
///
/// Never 404s: a missing record returns the documented defaults with
/// `defaulted: true`.
#[utoipa::path(
    get,
    path = "/api/v1/leave/balances/{employeeId}",
    tag = "leave",
    operation_id = "leave.getBalance",
    params(("employeeId" = String, Path, description = "Employee user id")),
    responses(
        (status = 200, description = "Leave balance", body = LeaveBalanceResponse),
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResponse<LeaveBalanceResponse> {
    match state.db.get_leave_balance(&employee_id).await {
        Ok(Some(balance)) => ApiResponse::success(LeaveBalanceResponse::from_balance(balance, false)),
        Ok(None) => ApiResponse::success(LeaveBalanceResponse::from_balance(
            LeaveBalance::default_for(&employee_id),
            true,
        )),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `PUT /api/v1/leave/balances/{employeeId}`
#[utoipa::path(
    put,
    path = "/api/v1/leave/balances/{employeeId}",
    tag = "leave",
    operation_id = "leave.putBalance",
    params(("employeeId" = String, Path, description = "Employee user id")),
    request_body = PutLeaveBalanceRequest,
    responses(
        (status = 200, description = "Stored balance", body = LeaveBalanceResponse),
    )
)]
pub async fn put_balance(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    axum::Json(req): axum::Json<PutLeaveBalanceRequest>,
) -> ApiResponse<LeaveBalanceResponse> {
    let balance = LeaveBalance {
        employee_id,
        annual: req.annual.into(),
        sick: req.sick.into(),
        emergency: req.emergency.into(),
        updated_at: Utc::now(),
    };

    match state.db.put_leave_balance(&balance).await {
        Ok(()) => ApiResponse::success(LeaveBalanceResponse::from_balance(balance, false)),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `POST /api/v1/leave/applications`
///
/// The approver defaults to the employee's manager when not supplied.
#[utoipa::path(
    post,
    path = "/api/v1/leave/applications",
    tag = "leave",
    operation_id = "leave.apply",
    request_body = CreateLeaveApplicationRequest,
    responses(
        (status = 201, description = "Submitted application", body = LeaveApplicationResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_application(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateLeaveApplicationRequest>,
) -> ApiResponse<LeaveApplicationResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }
    if req.end_date < req.start_date {
        return ApiResponse::error(ErrorCode::InvalidRequest, "endDate is before startDate");
    }

    let approver_id = match req.approver_id {
        Some(id) => Some(id),
        None => match state.db.get_user(&req.employee_id).await {
            Ok(Some(user)) => user.manager_id,
            Ok(None) => {
                return ApiResponse::error(
                    ErrorCode::NotFound,
                    format!("User {} not found", req.employee_id),
                )
            }
            Err(error) => return ApiResponse::from_error(&error),
        },
    };

    let application = LeaveApplication {
        id: nanoid::nanoid!(),
        employee_id: req.employee_id,
        leave_type: req.leave_type,
        start_date: req.start_date,
        end_date: req.end_date,
        days: req.days,
        reason: req.reason,
        status: LeaveStatus::Pending,
        approver_id,
        submitted_at: Utc::now(),
        reviewed_at: None,
    };

    match state.db.create_leave_application(&application).await {
        Ok(()) => ApiResponse::created(application.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/leave/applications?employeeId=`
#[utoipa::path(
    get,
    path = "/api/v1/leave/applications",
    tag = "leave",
    operation_id = "leave.list",
    responses(
        (status = 200, description = "Applications, newest first", body = ListLeaveApplicationsResponse),
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListLeaveApplicationsQuery>,
) -> ApiResponse<ListLeaveApplicationsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(200);

    match state
        .db
        .list_leave_applications(&query.employee_id, limit)
        .await
    {
        Ok(applications) => ApiResponse::success(ListLeaveApplicationsResponse {
            applications: applications
                .into_iter()
                .map(LeaveApplicationResponse::from)
                .collect(),
        }),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `POST /api/v1/leave/applications/{applicationId}:decide`
#[utoipa::path(
    post,
    path = "/api/v1/leave/applications/{applicationId}:decide",
    tag = "leave",
    operation_id = "leave.decide",
    params(("applicationId" = String, Path, description = "Application id")),
    request_body = DecideLeaveApplicationRequest,
    responses(
        (status = 200, description = "Decided application", body = LeaveApplicationResponse),
        (status = 403, description = "Not the designated approver", body = ApiError),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn decide_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(req): axum::Json<DecideLeaveApplicationRequest>,
) -> ApiResponse<LeaveApplicationResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }

    let mut application = match state.db.get_leave_application(&id).await {
        Ok(Some(application)) => application,
        Ok(None) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Application {id} not found"))
        }
        Err(error) => return ApiResponse::from_error(&error),
    };

    if let Err(error) = application.decide(&req.approver_id, req.approve) {
        return ApiResponse::from_error(&error);
    }

    match state.db.update_leave_application(&application).await {
        Ok(()) => ApiResponse::success(application.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `POST /api/v1/leave/applications/{applicationId}:cancel`
#[utoipa::path(
    post,
    path = "/api/v1/leave/applications/{applicationId}:cancel",
    tag = "leave",
    operation_id = "leave.cancel",
    params(("applicationId" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Cancelled application", body = LeaveApplicationResponse),
        (status = 400, description = "Not cancellable from current state", body = ApiError),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn cancel_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<LeaveApplicationResponse> {
    let mut application = match state.db.get_leave_application(&id).await {
        Ok(Some(application)) => application,
        Ok(None) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Application {id} not found"))
        }
        Err(error) => return ApiResponse::from_error(&error),
    };

    if let Err(error) = application.cancel() {
        return ApiResponse::from_error(&error);
    }

    match state.db.update_leave_application(&application).await {
        Ok(()) => ApiResponse::success(application.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}
