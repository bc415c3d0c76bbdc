use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{LeaveApplication, LeaveBalance, LeaveStatus, LeaveType, TypeBalance};

use super::users::parse_timestamp;

pub struct LeaveRepository;

impl LeaveRepository {
    pub async fn get_balance(
        conn: &Connection,
        employee_id: &str,
    ) -> Result<Option<LeaveBalance>> {
        let mut rows = conn
            .query(
                "SELECT * FROM leave_balances WHERE employee_id = ?1",
                params![employee_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_balance(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn put_balance(conn: &Connection, balance: &LeaveBalance) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO leave_balances (employee_id, annual, sick, emergency, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(employee_id) DO UPDATE SET
                annual = excluded.annual,
                sick = excluded.sick,
                emergency = excluded.emergency,
                updated_at = excluded.updated_at
            "#,
            params![
                balance.employee_id.clone(),
                serde_json::to_string(&balance.annual)?,
                serde_json::to_string(&balance.sick)?,
                serde_json::to_string(&balance.emergency)?,
                balance.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn create_application(
        conn: &Connection,
        application: &LeaveApplication,
    ) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO leave_applications (
                id, employee_id, leave_type, start_date, end_date, days, reason,
                status, approver_id, submitted_at, reviewed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                application.id.clone(),
                application.employee_id.clone(),
                application.leave_type.to_string(),
                application.start_date.to_rfc3339(),
                application.end_date.to_rfc3339(),
                application.days,
                application.reason.clone(),
                application.status.to_string(),
                application.approver_id.clone(),
                application.submitted_at.to_rfc3339(),
                application.reviewed_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_application(conn: &Connection, id: &str) -> Result<Option<LeaveApplication>> {
        let mut rows = conn
            .query(
                "SELECT * FROM leave_applications WHERE id = ?1",
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_application(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list_applications(
        conn: &Connection,
        employee_id: &str,
        limit: u32,
    ) -> Result<Vec<LeaveApplication>> {
        let mut rows = conn
            .query(
                r#"
                SELECT * FROM leave_applications
                WHERE employee_id = ?1
                ORDER BY submitted_at DESC
                LIMIT ?2
                "#,
                params![employee_id, limit],
            )
            .await?;

        let mut applications = Vec::new();
        while let Some(row) = rows.next().await? {
            applications.push(Self::row_to_application(&row)?);
        }
        Ok(applications)
    }

    pub async fn list_applications_by_status(
        conn: &Connection,
        employee_id: &str,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let mut placeholders = String::new();
        for i in 0..statuses.len() {
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push('?');
            placeholders.push_str(&(i + 2).to_string());
        }

        let sql = format!(
            "SELECT * FROM leave_applications WHERE employee_id = ?1 AND status IN ({placeholders})"
        );
        let mut query_params: Vec<libsql::Value> = vec![libsql::Value::from(employee_id)];
        query_params.extend(
            statuses
                .iter()
                .map(|s| libsql::Value::from(s.to_string())),
        );

        let mut rows = conn
            .query(&sql, libsql::params_from_iter(query_params))
            .await?;

        let mut applications = Vec::new();
        while let Some(row) = rows.next().await? {
            applications.push(Self::row_to_application(&row)?);
        }
        Ok(applications)
    }

    pub async fn update_application(
        conn: &Connection,
        application: &LeaveApplication,
    ) -> Result<()> {
        conn.execute(
            r#"
            UPDATE leave_applications SET
                status = ?2,
                approver_id = ?3,
                reviewed_at = ?4
            WHERE id = ?1
            "#,
            params![
                application.id.clone(),
                application.status.to_string(),
                application.approver_id.clone(),
                application.reviewed_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    fn row_to_balance(row: &libsql::Row) -> Result<LeaveBalance> {
        let fallback = TypeBalance::new(0);
        Ok(LeaveBalance {
            employee_id: row.get(0)?,
            annual: serde_json::from_str(&row.get::<String>(1)?).unwrap_or(fallback),
            sick: serde_json::from_str(&row.get::<String>(2)?).unwrap_or(fallback),
            emergency: serde_json::from_str(&row.get::<String>(3)?).unwrap_or(fallback),
            updated_at: parse_timestamp(&row.get::<String>(4)?),
        })
    }

    fn row_to_application(row: &libsql::Row) -> Result<LeaveApplication> {
        Ok(LeaveApplication {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            leave_type: row.get::<String>(2)?.parse().unwrap_or(LeaveType::Annual),
            start_date: parse_timestamp(&row.get::<String>(3)?),
            end_date: parse_timestamp(&row.get::<String>(4)?),
            days: row.get(5)?,
            reason: row.get(6)?,
            status: row
                .get::<String>(7)?
                .parse()
                .unwrap_or(LeaveStatus::Pending),
            approver_id: row.get(8)?,
            submitted_at: parse_timestamp(&row.get::<String>(9)?),
            reviewed_at: row
                .get::<Option<String>>(10)?
                .map(|value| parse_timestamp(&value)),
        })
    }
}
