use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{
    ConversationRepository, HrDocumentRepository, LeaveRepository, UserRepository,
};
use crate::db::traits::{
    ConversationStore, DatabaseBackend, HrDocumentStore, LeaveStore, UserStore,
};
use crate::error::Result;
use crate::models::{
    Conversation, HrDocument, HrDocumentSummary, LeaveApplication, LeaveBalance, LeaveStatus,
    ListHrDocumentsRequest, Pagination, User,
};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn upsert_user(&self, user: &User) -> Result<()> {
        let conn = self.db.connect()?;
        UserRepository::upsert(&conn, user).await
    }
    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_id(&conn, id).await
    }
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_email(&conn, email).await
    }
    async fn get_direct_reports(&self, manager_id: &str) -> Result<Vec<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_direct_reports(&conn, manager_id).await
    }
}

#[async_trait]
impl LeaveStore for LibSqlBackend {
    async fn get_leave_balance(&self, employee_id: &str) -> Result<Option<LeaveBalance>> {
        let conn = self.db.connect()?;
        LeaveRepository::get_balance(&conn, employee_id).await
    }
    async fn put_leave_balance(&self, balance: &LeaveBalance) -> Result<()> {
        let conn = self.db.connect()?;
        LeaveRepository::put_balance(&conn, balance).await
    }
    async fn create_leave_application(&self, application: &LeaveApplication) -> Result<()> {
        let conn = self.db.connect()?;
        LeaveRepository::create_application(&conn, application).await
    }
    async fn get_leave_application(&self, id: &str) -> Result<Option<LeaveApplication>> {
        let conn = self.db.connect()?;
        LeaveRepository::get_application(&conn, id).await
    }
    async fn list_leave_applications(
        &self,
        employee_id: &str,
        limit: u32,
    ) -> Result<Vec<LeaveApplication>> {
        let conn = self.db.connect()?;
        LeaveRepository::list_applications(&conn, employee_id, limit).await
    }
    async fn list_leave_applications_by_status(
        &self,
        employee_id: &str,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>> {
        let conn = self.db.connect()?;
        LeaveRepository::list_applications_by_status(&conn, employee_id, statuses).await
    }
    async fn update_leave_application(&self, application: &LeaveApplication) -> Result<()> {
        let conn = self.db.connect()?;
        LeaveRepository::update_application(&conn, application).await
    }
}

#[async_trait]
impl HrDocumentStore for LibSqlBackend {
    async fn create_hr_document(&self, doc: &HrDocument) -> Result<()> {
        let conn = self.db.connect()?;
        HrDocumentRepository::create(&conn, doc).await
    }
    async fn get_hr_document(&self, id: &str) -> Result<Option<HrDocument>> {
        let conn = self.db.connect()?;
        HrDocumentRepository::get_by_id(&conn, id).await
    }
    async fn update_hr_document(&self, doc: &HrDocument) -> Result<()> {
        let conn = self.db.connect()?;
        HrDocumentRepository::update(&conn, doc).await
    }
    async fn delete_hr_document(&self, id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        HrDocumentRepository::delete(&conn, id).await
    }
    async fn list_hr_documents(
        &self,
        req: &ListHrDocumentsRequest,
    ) -> Result<(Vec<HrDocumentSummary>, Pagination)> {
        let conn = self.db.connect()?;
        HrDocumentRepository::list(&conn, req).await
    }
    async fn get_recent_hr_documents(&self, limit: u32) -> Result<Vec<HrDocument>> {
        let conn = self.db.connect()?;
        HrDocumentRepository::get_recent(&conn, limit).await
    }
}

#[async_trait]
impl ConversationStore for LibSqlBackend {
    async fn create_conversation(&self, conversation: &Conversation) -> Result<()> {
        let conn = self.db.connect()?;
        ConversationRepository::create(&conn, conversation).await
    }
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        let conn = self.db.connect()?;
        ConversationRepository::get_by_id(&conn, id).await
    }
    async fn update_conversation(&self, conversation: &Conversation) -> Result<()> {
        let conn = self.db.connect()?;
        ConversationRepository::update(&conn, conversation).await
    }
    async fn list_conversations(&self, user_id: &str, limit: u32) -> Result<Vec<Conversation>> {
        let conn = self.db.connect()?;
        ConversationRepository::list_for_user(&conn, user_id, limit).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
