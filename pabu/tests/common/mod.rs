#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use pabu::config::DatabaseConfig;
use pabu::db::{Database, DatabaseBackend, LibSqlBackend};
use pabu::models::{Role, User};

/// Fresh file-backed database in a temp dir. The TempDir must outlive the
/// backend or the file disappears under it.
pub async fn test_backend() -> (Arc<dyn DatabaseBackend>, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = temp_dir.path().join("pabu_test.db");

    let config = DatabaseConfig {
        url: format!("file:{}", db_path.display()),
        auth_token: None,
        local_path: None,
    };

    let db = Database::new(&config)
        .await
        .expect("failed to create test database");

    (Arc::new(LibSqlBackend::new(db)), temp_dir)
}

pub fn test_user(id: &str, name: &str, role: Role) -> User {
    let mut user = User::new(
        id.to_string(),
        format!("{}@corp.example", name.to_lowercase()),
        name.to_string(),
        format!("EMP-{}", id),
    );
    user.role = role;
    user.department = "Engineering".to_string();
    user.position = "Engineer".to_string();
    user
}
