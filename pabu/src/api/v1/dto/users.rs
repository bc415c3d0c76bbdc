use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Availability, Role, User};

/// `PUT /api/v1/users/{id}` body. The stored role is re-derived from the
/// configured email directory on every upsert; a role supplied here only
/// applies when the directory has no entry for the email.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub employee_id: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager_id: Option<String>,
    pub role: Option<Role>,
    pub language: Option<String>,
    pub phone: Option<String>,
    pub site: Option<String>,
    pub projects: Option<Vec<String>>,
    pub status: Option<Availability>,
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub manager_id: Option<String>,
    pub role: Role,
    pub language: String,
    pub phone: Option<String>,
    pub site: Option<String>,
    pub projects: Vec<String>,
    pub status: Availability,
    pub join_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            employee_id: user.employee_id,
            department: user.department,
            position: user.position,
            manager_id: user.manager_id,
            role: user.role,
            language: user.language,
            phone: user.phone,
            site: user.site,
            projects: user.projects,
            status: user.status,
            join_date: user.join_date,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
}
