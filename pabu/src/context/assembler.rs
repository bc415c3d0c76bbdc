use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;

use crate::db::traits::DatabaseBackend;
use crate::models::{Availability, LeaveBalance, LeaveStatus, LeaveType, User};

/// Leave the member is on (or about to be on) right now.
#[derive(Debug, Clone)]
pub struct CurrentLeave {
    pub leave_type: LeaveType,
    pub end_date: DateTime<Utc>,
}

/// One direct report, enriched with live leave state for the roster.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub employee_id: String,
    pub position: String,
    pub department: String,
    pub site: Option<String>,
    pub projects: Vec<String>,
    pub status: Availability,
    pub current_leave: Option<CurrentLeave>,
    pub balance: Option<LeaveBalance>,
}

/// Everything the prompt builder needs about the requesting user.
///
/// `team` is `Some` only for privileged roles (manager, hr, admin); a
/// manager with no reports gets `Some(vec![])`, not `None`.
#[derive(Debug, Clone)]
pub struct ContextBundle {
    pub user: User,
    pub balance: LeaveBalance,
    pub team: Option<Vec<TeamMember>>,
}

/// Gathers per-user context from the database ahead of each chat turn.
///
/// Branches fan out concurrently and degrade independently. A failed
/// balance lookup falls back to the documented defaults, a failed team
/// lookup yields an empty roster. Context assembly never fails a turn.
pub struct ContextAssembler {
    db: Arc<dyn DatabaseBackend>,
}

impl ContextAssembler {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    pub async fn assemble(&self, user: &User) -> ContextBundle {
        self.assemble_at(user, Utc::now().date_naive()).await
    }

    /// Assembly pinned to an explicit date for the current-leave window.
    pub async fn assemble_at(&self, user: &User, today: NaiveDate) -> ContextBundle {
        let (balance, team) = tokio::join!(self.fetch_balance(user), self.fetch_team(user, today));

        ContextBundle {
            user: user.clone(),
            balance,
            team,
        }
    }

    async fn fetch_balance(&self, user: &User) -> LeaveBalance {
        match self.db.get_leave_balance(&user.id).await {
            Ok(Some(balance)) => balance,
            Ok(None) => LeaveBalance::default_for(&user.id),
            Err(error) => {
                tracing::warn!(user_id = %user.id, error = %error, "Leave balance lookup failed, using defaults");
                LeaveBalance::default_for(&user.id)
            }
        }
    }

    async fn fetch_team(&self, user: &User, today: NaiveDate) -> Option<Vec<TeamMember>> {
        if !user.role.is_privileged() {
            return None;
        }

        let reports = match self.db.get_direct_reports(&user.id).await {
            Ok(reports) => reports,
            Err(error) => {
                tracing::warn!(user_id = %user.id, error = %error, "Direct report lookup failed, roster omitted");
                return Some(Vec::new());
            }
        };

        let members = join_all(
            reports
                .into_iter()
                .map(|report| self.enrich_member(report, today)),
        )
        .await;

        Some(members)
    }

    async fn enrich_member(&self, report: User, today: NaiveDate) -> TeamMember {
        let (current_leave, balance) = tokio::join!(
            self.find_current_leave(&report.id, today),
            self.fetch_member_balance(&report.id),
        );

        let status = if current_leave.is_some() {
            Availability::OnLeave
        } else {
            report.status
        };

        TeamMember {
            id: report.id,
            name: report.name,
            employee_id: report.employee_id,
            position: report.position,
            department: report.department,
            site: report.site,
            projects: report.projects,
            status,
            current_leave,
            balance,
        }
    }

    async fn find_current_leave(&self, user_id: &str, today: NaiveDate) -> Option<CurrentLeave> {
        let applications = match self
            .db
            .list_leave_applications_by_status(
                user_id,
                &[LeaveStatus::Pending, LeaveStatus::Approved],
            )
            .await
        {
            Ok(applications) => applications,
            Err(error) => {
                tracing::warn!(user_id = %user_id, error = %error, "Leave application lookup failed");
                return None;
            }
        };

        applications
            .into_iter()
            .find(|application| application.is_current_on(today))
            .map(|application| CurrentLeave {
                leave_type: application.leave_type,
                end_date: application.end_date,
            })
    }

    async fn fetch_member_balance(&self, user_id: &str) -> Option<LeaveBalance> {
        match self.db.get_leave_balance(user_id).await {
            Ok(balance) => balance,
            Err(error) => {
                tracing::warn!(user_id = %user_id, error = %error, "Member balance lookup failed");
                None
            }
        }
    }
}
