use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{LeaveApplication, LeaveBalance, LeaveStatus, LeaveType, TypeBalance};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeBalanceDto {
    pub earned: i32,
    pub used: i32,
    pub available: i32,
    pub pending: i32,
}

impl From<TypeBalance> for TypeBalanceDto {
    fn from(balance: TypeBalance) -> Self {
        Self {
            earned: balance.earned,
            used: balance.used,
            available: balance.available,
            pending: balance.pending,
        }
    }
}

impl From<TypeBalanceDto> for TypeBalance {
    fn from(dto: TypeBalanceDto) -> Self {
        Self {
            earned: dto.earned,
            used: dto.used,
            available: dto.available,
            pending: dto.pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceResponse {
    pub employee_id: String,
    pub annual: TypeBalanceDto,
    pub sick: TypeBalanceDto,
    pub emergency: TypeBalanceDto,
    pub updated_at: DateTime<Utc>,
    /// True when no stored record existed and defaults were substituted.
    pub defaulted: bool,
}

impl LeaveBalanceResponse {
    pub fn from_balance(balance: LeaveBalance, defaulted: bool) -> Self {
        Self {
            employee_id: balance.employee_id,
            annual: balance.annual.into(),
            sick: balance.sick.into(),
            emergency: balance.emergency.into(),
            updated_at: balance.updated_at,
            defaulted,
        }
    }
}

/// `PUT /api/v1/leave/balances/{employeeId}` body.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PutLeaveBalanceRequest {
    pub annual: TypeBalanceDto,
    pub sick: TypeBalanceDto,
    pub emergency: TypeBalanceDto,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveApplicationRequest {
    #[validate(length(min = 1, max = 128))]
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 1, max = 365))]
    pub days: i32,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
    pub approver_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecideLeaveApplicationRequest {
    #[validate(length(min = 1, max = 128))]
    pub approver_id: String,
    pub approve: bool,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLeaveApplicationsQuery {
    pub employee_id: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplicationResponse {
    pub id: String,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub days: i32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approver_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<LeaveApplication> for LeaveApplicationResponse {
    fn from(application: LeaveApplication) -> Self {
        Self {
            id: application.id,
            employee_id: application.employee_id,
            leave_type: application.leave_type,
            start_date: application.start_date,
            end_date: application.end_date,
            days: application.days,
            reason: application.reason,
            status: application.status,
            approver_id: application.approver_id,
            submitted_at: application.submitted_at,
            reviewed_at: application.reviewed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLeaveApplicationsResponse {
    pub applications: Vec<LeaveApplicationResponse>,
}
