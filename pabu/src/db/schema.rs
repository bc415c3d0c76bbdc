use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Users table
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            department TEXT DEFAULT '',
            position TEXT DEFAULT '',
            manager_id TEXT,
            role TEXT NOT NULL DEFAULT 'employee',
            language TEXT NOT NULL DEFAULT 'en',
            phone TEXT,
            site TEXT,
            projects TEXT DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'available',
            join_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_manager_id ON users(manager_id);
        CREATE INDEX IF NOT EXISTS idx_users_employee_id ON users(employee_id);

        -- Leave balances, one row per employee, per-type counters as JSON
        CREATE TABLE IF NOT EXISTS leave_balances (
            employee_id TEXT PRIMARY KEY,
            annual TEXT NOT NULL,
            sick TEXT NOT NULL,
            emergency TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Leave applications
        CREATE TABLE IF NOT EXISTS leave_applications (
            id TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL,
            leave_type TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            days INTEGER NOT NULL,
            reason TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            approver_id TEXT,
            submitted_at TEXT NOT NULL,
            reviewed_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_leave_applications_employee_id
            ON leave_applications(employee_id);
        CREATE INDEX IF NOT EXISTS idx_leave_applications_status
            ON leave_applications(status);

        -- HR knowledge-base documents
        CREATE TABLE IF NOT EXISTS hr_documents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT,
            category TEXT NOT NULL DEFAULT 'document',
            version TEXT NOT NULL DEFAULT '1.0',
            tags TEXT DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_hr_documents_category ON hr_documents(category);
        CREATE INDEX IF NOT EXISTS idx_hr_documents_updated_at ON hr_documents(updated_at);

        -- Conversations: append-only message log embedded as JSON
        CREATE TABLE IF NOT EXISTS conversations (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            language TEXT NOT NULL DEFAULT 'en',
            messages TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_conversations_user_id ON conversations(user_id);
        CREATE INDEX IF NOT EXISTS idx_conversations_updated_at ON conversations(updated_at);
        "#,
    )
    .await?;

    Ok(())
}
