use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role. Derived authoritatively from the configured email -> role
/// directory and re-synced on every upsert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Hr,
    Admin,
}

impl Role {
    /// Roles that may see team summaries (direct reports and their leave).
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Manager | Self::Hr | Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => write!(f, "employee"),
            Self::Manager => write!(f, "manager"),
            Self::Hr => write!(f, "hr"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            "hr" => Ok(Self::Hr),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// Presence status as stored on the user record. The context assembler
/// overrides this with `on_leave` while an active leave contains today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Available,
    OnLeave,
    Busy,
    Offline,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::OnLeave => write!(f, "on_leave"),
            Self::Busy => write!(f, "busy"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "on_leave" => Ok(Self::OnLeave),
            "busy" => Ok(Self::Busy),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("Unknown availability: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    /// Self-reference to another user; forms a forest, not enforced.
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

impl User {
    pub fn new(id: String, email: String, name: String, employee_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            employee_id,
            department: String::new(),
            position: String::new(),
            manager_id: None,
            role: Role::default(),
            language: "en".to_string(),
            phone: None,
            site: None,
            projects: Vec::new(),
            status: Availability::default(),
            join_date: now,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_roles_see_team_data() {
        assert!(Role::Manager.is_privileged());
        assert!(Role::Hr.is_privileged());
        assert!(Role::Admin.is_privileged());
        assert!(!Role::Employee.is_privileged());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Employee, Role::Manager, Role::Hr, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("wizard".parse::<Role>().is_err());
    }

    #[test]
    fn availability_serializes_snake_case() {
        let json = serde_json::to_string(&Availability::OnLeave).unwrap();
        assert_eq!(json, "\"on_leave\"");
    }
}
