use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{
    DocumentCategory, HrDocument, HrDocumentSummary, ListHrDocumentsRequest, Pagination,
};

use super::users::parse_timestamp;

pub struct HrDocumentRepository;

impl HrDocumentRepository {
    pub async fn create(conn: &Connection, doc: &HrDocument) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO hr_documents (
                id, title, content, category, version, tags, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                doc.id.clone(),
                doc.title.clone(),
                doc.content.clone(),
                doc.category.to_string(),
                doc.version.clone(),
                serde_json::to_string(&doc.tags)?,
                doc.created_at.to_rfc3339(),
                doc.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<HrDocument>> {
        let mut rows = conn
            .query("SELECT * FROM hr_documents WHERE id = ?1", params![id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_document(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update(conn: &Connection, doc: &HrDocument) -> Result<()> {
        conn.execute(
            r#"
            UPDATE hr_documents SET
                title = ?2,
                content = ?3,
                category = ?4,
                version = ?5,
                tags = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                doc.id.clone(),
                doc.title.clone(),
                doc.content.clone(),
                doc.category.to_string(),
                doc.version.clone(),
                serde_json::to_string(&doc.tags)?,
                doc.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn delete(conn: &Connection, id: &str) -> Result<bool> {
        let rows_affected = conn
            .execute("DELETE FROM hr_documents WHERE id = ?1", params![id])
            .await?;

        Ok(rows_affected > 0)
    }

    pub async fn list(
        conn: &Connection,
        req: &ListHrDocumentsRequest,
    ) -> Result<(Vec<HrDocumentSummary>, Pagination)> {
        let limit = req.limit.unwrap_or(20).min(100);
        let page = req.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;
        let order = req.order.as_deref().unwrap_or("desc");
        let sort = req.sort.as_deref().unwrap_or("updated_at");

        let order_clause = format!(
            "ORDER BY {} {}",
            match sort {
                "created_at" => "created_at",
                "title" => "title",
                _ => "updated_at",
            },
            match order {
                "asc" => "ASC",
                _ => "DESC",
            }
        );

        let mut where_clause = String::new();
        let mut filter_params: Vec<libsql::Value> = Vec::new();
        if let Some(category) = req.category {
            where_clause = "WHERE category = ?1".to_string();
            filter_params.push(libsql::Value::from(category.to_string()));
        }

        let count_query = format!("SELECT COUNT(*) FROM hr_documents {where_clause}");
        let mut count_rows = conn
            .query(&count_query, libsql::params_from_iter(filter_params.clone()))
            .await?;
        let total: i64 = if let Some(row) = count_rows.next().await? {
            row.get(0)?
        } else {
            0
        };

        let limit_idx = filter_params.len() + 1;
        let offset_idx = filter_params.len() + 2;
        let query = format!(
            "SELECT * FROM hr_documents {where_clause} {order_clause} LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
        );

        let mut list_params = filter_params;
        list_params.push(libsql::Value::from(limit));
        list_params.push(libsql::Value::from(offset));

        let mut rows = conn
            .query(&query, libsql::params_from_iter(list_params))
            .await?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            documents.push(HrDocumentSummary::from(Self::row_to_document(&row)?));
        }

        Ok((documents, Pagination::new(page, limit, total as u32)))
    }

    pub async fn get_recent(conn: &Connection, limit: u32) -> Result<Vec<HrDocument>> {
        let mut rows = conn
            .query(
                "SELECT * FROM hr_documents ORDER BY updated_at DESC LIMIT ?1",
                params![limit],
            )
            .await?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            documents.push(Self::row_to_document(&row)?);
        }
        Ok(documents)
    }

    fn row_to_document(row: &libsql::Row) -> Result<HrDocument> {
        Ok(HrDocument {
            id: row.get(0)?,
            title: row.get(1)?,
            // NULL content reads back as empty; the scorer treats it as such
            // rather than failing.
            content: row.get::<Option<String>>(2)?.unwrap_or_default(),
            category: row
                .get::<String>(3)?
                .parse()
                .unwrap_or(DocumentCategory::Document),
            version: row.get(4)?,
            tags: serde_json::from_str(&row.get::<Option<String>>(5)?.unwrap_or_default())
                .unwrap_or_default(),
            created_at: parse_timestamp(&row.get::<String>(6)?),
            updated_at: parse_timestamp(&row.get::<String>(7)?),
        })
    }
}
