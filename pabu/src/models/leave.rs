use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PabuError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Emergency,
    Unpaid,
    Maternity,
    Paternity,
    Pilgrimage,
}

impl LeaveType {
    /// Human label used in prompts and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Sick => "Sick",
            Self::Emergency => "Emergency",
            Self::Unpaid => "Unpaid",
            Self::Maternity => "Maternity",
            Self::Paternity => "Paternity",
            Self::Pilgrimage => "Pilgrimage",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Sick => write!(f, "sick"),
            Self::Emergency => write!(f, "emergency"),
            Self::Unpaid => write!(f, "unpaid"),
            Self::Maternity => write!(f, "maternity"),
            Self::Paternity => write!(f, "paternity"),
            Self::Pilgrimage => write!(f, "pilgrimage"),
        }
    }
}

impl std::str::FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "sick" => Ok(Self::Sick),
            "emergency" => Ok(Self::Emergency),
            "unpaid" => Ok(Self::Unpaid),
            "maternity" => Ok(Self::Maternity),
            "paternity" => Ok(Self::Paternity),
            "pilgrimage" => Ok(Self::Pilgrimage),
            _ => Err(format!("Unknown leave type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown leave status: {s}")),
        }
    }
}

/// Per-type day counters. `available = earned - used - pending` is expected
/// but not enforced at write time; the test suite validates it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct TypeBalance {
    pub earned: i32,
    pub used: i32,
    pub available: i32,
    pub pending: i32,
}

impl TypeBalance {
    pub fn new(earned: i32) -> Self {
        Self {
            earned,
            used: 0,
            available: earned,
            pending: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalance {
    pub employee_id: String,
    pub annual: TypeBalance,
    pub sick: TypeBalance,
    pub emergency: TypeBalance,
    pub updated_at: DateTime<Utc>,
}

impl LeaveBalance {
    /// Documented defaults when no balance record exists. Absence of a row
    /// is not an error condition.
    pub fn default_for(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            annual: TypeBalance::new(20),
            sick: TypeBalance::new(10),
            emergency: TypeBalance::new(5),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplication {
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

impl LeaveApplication {
    /// Whether this application keeps the employee on leave on `today`.
    /// Date-only, inclusive bounds; only pending and approved count.
    pub fn is_current_on(&self, today: NaiveDate) -> bool {
        if !matches!(self.status, LeaveStatus::Pending | LeaveStatus::Approved) {
            return false;
        }
        let start = self.start_date.date_naive();
        let end = self.end_date.date_naive();
        start <= today && today <= end
    }

    /// Approve or reject a pending application. Only the designated approver
    /// may decide, and decided applications never return to pending.
    pub fn decide(&mut self, approver_id: &str, approve: bool) -> Result<()> {
        if self.status != LeaveStatus::Pending {
            return Err(PabuError::Validation(format!(
                "Leave application {} is already {}",
                self.id, self.status
            )));
        }
        if self.approver_id.as_deref() != Some(approver_id) {
            return Err(PabuError::Forbidden(format!(
                "User {approver_id} is not the designated approver"
            )));
        }
        self.status = if approve {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Rejected
        };
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }

    /// Cancel a pending or approved application.
    pub fn cancel(&mut self) -> Result<()> {
        match self.status {
            LeaveStatus::Pending | LeaveStatus::Approved => {
                self.status = LeaveStatus::Cancelled;
                self.reviewed_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(PabuError::Validation(format!(
                "Leave application {} cannot be cancelled from {}",
                self.id, self.status
            ))),
        }
    }
}
