use std::sync::Arc;

use libsql::{Builder, Connection};

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

/// Handle to the underlying libsql database. `DATABASE_URL` selects the
/// flavor: `libsql://`/`https://` for remote (with an optional local replica
/// path), `:memory:` for tests, anything else for a local file.
pub struct Database {
    db: Arc<libsql::Database>,
    pragmas: Pragmas,
}

/// Connection pragmas, read from the environment with safe fallbacks.
#[derive(Debug, Clone)]
struct Pragmas {
    busy_timeout_ms: u64,
    journal_mode: &'static str,
    synchronous: &'static str,
}

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];
const SYNCHRONOUS_LEVELS: &[&str] = &["OFF", "NORMAL", "FULL", "EXTRA"];

impl Pragmas {
    fn from_env() -> Self {
        let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);
        Self {
            busy_timeout_ms,
            journal_mode: lookup(JOURNAL_MODES, "DATABASE_JOURNAL_MODE", "WAL"),
            synchronous: lookup(SYNCHRONOUS_LEVELS, "DATABASE_SYNCHRONOUS", "NORMAL"),
        }
    }

    /// Pragma failures are logged and ignored; remote backends reject some of
    /// them and the server should still come up.
    async fn apply(&self, conn: &Connection) {
        let statements = [
            format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms),
            format!("PRAGMA journal_mode = {}", self.journal_mode),
            format!("PRAGMA synchronous = {}", self.synchronous),
        ];
        for statement in &statements {
            if let Err(error) = conn.execute_batch(statement).await {
                tracing::warn!(statement = %statement, error = %error, "Pragma not applied");
            }
        }
    }
}

fn lookup(allowed: &[&'static str], var: &str, default: &'static str) -> &'static str {
    let value = match std::env::var(var) {
        Ok(value) => value.trim().to_uppercase(),
        Err(_) => return default,
    };
    match allowed.iter().find(|v| **v == value) {
        Some(found) => found,
        None => {
            tracing::warn!("Invalid value '{}' for {}, using {}", value, var, default);
            default
        }
    }
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::build(config).await?;
        let database = Self {
            db: Arc::new(db),
            pragmas: Pragmas::from_env(),
        };

        let conn = database.connect()?;
        database.pragmas.apply(&conn).await;
        schema::init_schema(&conn).await?;

        Ok(database)
    }

    async fn build(config: &DatabaseConfig) -> Result<libsql::Database> {
        if config.url.starts_with("libsql://") || config.url.starts_with("https://") {
            let token = config.auth_token.clone().unwrap_or_default();
            let db = match &config.local_path {
                Some(replica) => {
                    Builder::new_remote_replica(replica, config.url.clone(), token)
                        .build()
                        .await?
                }
                None => Builder::new_remote(config.url.clone(), token).build().await?,
            };
            return Ok(db);
        }

        let path = if config.url == ":memory:" {
            ":memory:"
        } else {
            config.url.strip_prefix("file:").unwrap_or(&config.url)
        };
        Ok(Builder::new_local(path).build().await?)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    /// Replicates against the remote primary. A no-op failure on purely local
    /// databases, so callers can invoke it unconditionally.
    pub async fn sync(&self) -> Result<()> {
        if let Ok(frame) = self.db.sync().await {
            tracing::info!("Database synced: {:?}", frame);
        }
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            pragmas: self.pragmas.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_database_initializes_schema() {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        };
        let db = Database::new(&config).await.unwrap();
        let conn = db.connect().unwrap();

        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'users'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[test]
    fn unknown_pragma_values_fall_back() {
        assert_eq!(lookup(JOURNAL_MODES, "PABU_TEST_UNSET_VAR", "WAL"), "WAL");
    }
}
