use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Conversation, HrDocument, HrDocumentSummary, LeaveApplication, LeaveBalance, LeaveStatus,
    ListHrDocumentsRequest, Pagination, User,
};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// CRUD and query operations for user profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn upsert_user(&self, user: &User) -> Result<()>;
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Users whose `manager_id` equals `manager_id`: direct reports only,
    /// no skip-level expansion. Ordered by employee_id for determinism.
    async fn get_direct_reports(&self, manager_id: &str) -> Result<Vec<User>>;
}

/// Leave balances and applications.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Returns `None` when no balance row exists; callers substitute the
    /// documented defaults rather than treating absence as an error.
    async fn get_leave_balance(&self, employee_id: &str) -> Result<Option<LeaveBalance>>;
    async fn put_leave_balance(&self, balance: &LeaveBalance) -> Result<()>;
    async fn create_leave_application(&self, application: &LeaveApplication) -> Result<()>;
    async fn get_leave_application(&self, id: &str) -> Result<Option<LeaveApplication>>;
    async fn list_leave_applications(
        &self,
        employee_id: &str,
        limit: u32,
    ) -> Result<Vec<LeaveApplication>>;
    /// Applications with status in `statuses` for one employee; used to find
    /// current leave (pending or approved).
    async fn list_leave_applications_by_status(
        &self,
        employee_id: &str,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>>;
    async fn update_leave_application(&self, application: &LeaveApplication) -> Result<()>;
}

/// CRUD and listing for HR knowledge-base documents.
#[async_trait]
pub trait HrDocumentStore: Send + Sync {
    async fn create_hr_document(&self, doc: &HrDocument) -> Result<()>;
    async fn get_hr_document(&self, id: &str) -> Result<Option<HrDocument>>;
    async fn update_hr_document(&self, doc: &HrDocument) -> Result<()>;
    async fn delete_hr_document(&self, id: &str) -> Result<bool>;
    async fn list_hr_documents(
        &self,
        req: &ListHrDocumentsRequest,
    ) -> Result<(Vec<HrDocumentSummary>, Pagination)>;
    /// Most recently updated documents with full content, for retrieval.
    async fn get_recent_hr_documents(&self, limit: u32) -> Result<Vec<HrDocument>>;
}

/// Conversation persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn create_conversation(&self, conversation: &Conversation) -> Result<()>;
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>>;
    /// Replaces the message log and updated_at for an existing conversation.
    async fn update_conversation(&self, conversation: &Conversation) -> Result<()>;
    async fn list_conversations(&self, user_id: &str, limit: u32) -> Result<Vec<Conversation>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete database backend combining all store traits plus lifecycle
/// operations (initialization, sync).
#[async_trait]
pub trait DatabaseBackend:
    UserStore + LeaveStore + HrDocumentStore + ConversationStore
{
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
