use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{Availability, Role, User};

pub struct UserRepository;

impl UserRepository {
    pub async fn upsert(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO users (
                id, email, name, employee_id, department, position, manager_id,
                role, language, phone, site, projects, status, join_date,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16
            )
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                name = excluded.name,
                employee_id = excluded.employee_id,
                department = excluded.department,
                position = excluded.position,
                manager_id = excluded.manager_id,
                role = excluded.role,
                language = excluded.language,
                phone = excluded.phone,
                site = excluded.site,
                projects = excluded.projects,
                status = excluded.status,
                join_date = excluded.join_date,
                updated_at = excluded.updated_at
            "#,
            params![
                user.id.clone(),
                user.email.clone(),
                user.name.clone(),
                user.employee_id.clone(),
                user.department.clone(),
                user.position.clone(),
                user.manager_id.clone(),
                user.role.to_string(),
                user.language.clone(),
                user.phone.clone(),
                user.site.clone(),
                serde_json::to_string(&user.projects)?,
                user.status.to_string(),
                user.join_date.to_rfc3339(),
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<User>> {
        let mut rows = conn
            .query("SELECT * FROM users WHERE id = ?1", params![id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        let mut rows = conn
            .query(
                "SELECT * FROM users WHERE email = ?1 COLLATE NOCASE",
                params![email],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_direct_reports(conn: &Connection, manager_id: &str) -> Result<Vec<User>> {
        let mut rows = conn
            .query(
                "SELECT * FROM users WHERE manager_id = ?1 ORDER BY employee_id ASC",
                params![manager_id],
            )
            .await?;

        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(Self::row_to_user(&row)?);
        }
        Ok(reports)
    }

    fn row_to_user(row: &libsql::Row) -> Result<User> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            employee_id: row.get(3)?,
            department: row.get::<Option<String>>(4)?.unwrap_or_default(),
            position: row.get::<Option<String>>(5)?.unwrap_or_default(),
            manager_id: row.get(6)?,
            role: row.get::<String>(7)?.parse().unwrap_or(Role::Employee),
            language: row.get(8)?,
            phone: row.get(9)?,
            site: row.get(10)?,
            projects: serde_json::from_str(&row.get::<Option<String>>(11)?.unwrap_or_default())
                .unwrap_or_default(),
            status: row
                .get::<String>(12)?
                .parse()
                .unwrap_or(Availability::Available),
            join_date: parse_timestamp(&row.get::<String>(13)?),
            created_at: parse_timestamp(&row.get::<String>(14)?),
            updated_at: parse_timestamp(&row.get::<String>(15)?),
        })
    }
}

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
