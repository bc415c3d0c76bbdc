use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Conversation;

use super::users::parse_timestamp;

pub struct ConversationRepository;

impl ConversationRepository {
    pub async fn create(conn: &Connection, conversation: &Conversation) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO conversations (id, user_id, language, messages, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                conversation.id.clone(),
                conversation.user_id.clone(),
                conversation.language.clone(),
                serde_json::to_string(&conversation.messages)?,
                conversation.created_at.to_rfc3339(),
                conversation.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Conversation>> {
        let mut rows = conn
            .query("SELECT * FROM conversations WHERE id = ?1", params![id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_conversation(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update(conn: &Connection, conversation: &Conversation) -> Result<()> {
        conn.execute(
            r#"
            UPDATE conversations SET
                language = ?2,
                messages = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
            params![
                conversation.id.clone(),
                conversation.language.clone(),
                serde_json::to_string(&conversation.messages)?,
                conversation.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn list_for_user(
        conn: &Connection,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Conversation>> {
        let mut rows = conn
            .query(
                r#"
                SELECT * FROM conversations
                WHERE user_id = ?1
                ORDER BY updated_at DESC
                LIMIT ?2
                "#,
                params![user_id, limit],
            )
            .await?;

        let mut conversations = Vec::new();
        while let Some(row) = rows.next().await? {
            conversations.push(Self::row_to_conversation(&row)?);
        }
        Ok(conversations)
    }

    fn row_to_conversation(row: &libsql::Row) -> Result<Conversation> {
        Ok(Conversation {
            id: row.get(0)?,
            user_id: row.get(1)?,
            language: row.get(2)?,
            messages: serde_json::from_str(&row.get::<String>(3)?).unwrap_or_default(),
            created_at: parse_timestamp(&row.get::<String>(4)?),
            updated_at: parse_timestamp(&row.get::<String>(5)?),
        })
    }
}
