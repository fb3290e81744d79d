//! History repository backed by the `blog_history` table.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{GenerateParams, GenerationResult, HistoryRecord, Style};

/// Repository for signed-in users' generation history.
#[derive(Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one history row for `user_id`.
    pub async fn insert(
        &self,
        user_id: &str,
        params: &GenerateParams,
        result: &GenerationResult,
    ) -> Result<HistoryRecord, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now().trunc_subsecs(6);
        let keywords_json = serde_json::to_string(&params.keywords)?;
        let result_json = serde_json::to_string(result)?;

        sqlx::query(
            "INSERT INTO blog_history (id, user_id, topic, keywords, style, result, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&params.topic)
        .bind(&keywords_json)
        .bind(params.style.as_str())
        .bind(&result_json)
        .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        Ok(HistoryRecord {
            id: Some(id),
            topic: params.topic.clone(),
            keywords: params.keywords.clone(),
            style: params.style,
            created_at,
            result: Some(result.clone()),
        })
    }

    /// List a user's history, newest first.
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT id, topic, keywords, style, result, created_at FROM blog_history WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().filter_map(history_from_row).collect())
    }

    /// Delete one record owned by `user_id`. Returns false when no row matched.
    pub async fn delete_by_id(&self, id: &str, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blog_history WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every record owned by `user_id`.
    pub async fn delete_all_for_user(&self, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM blog_history WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Total number of rows across all users.
    pub async fn count_all(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM blog_history")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// Helper functions for row conversion

fn history_from_row(row: &sqlx::sqlite::SqliteRow) -> Option<HistoryRecord> {
    let id: String = row.get("id");
    let style_str: String = row.get("style");
    let style = match style_str.parse::<Style>() {
        Ok(style) => style,
        Err(e) => {
            tracing::warn!("Skipping history row {}: {}", id, e);
            return None;
        }
    };

    let created_at_str: String = row.get("created_at");
    let created_at = match DateTime::parse_from_rfc3339(&created_at_str) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!("Skipping history row {}: bad created_at: {}", id, e);
            return None;
        }
    };

    let keywords_str: String = row.get("keywords");
    let result_str: Option<String> = row.get("result");

    Some(HistoryRecord {
        id: Some(id),
        topic: row.get("topic"),
        keywords: parse_json_array(&keywords_str),
        style,
        created_at,
        result: result_str.and_then(|s| serde_json::from_str(&s).ok()),
    })
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn setup() -> (HistoryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .unwrap();
        (HistoryRepository::new(pool), temp_dir)
    }

    fn params(topic: &str) -> GenerateParams {
        GenerateParams {
            topic: topic.to_string(),
            keywords: vec!["a".to_string(), "b".to_string()],
            style: Style::Tutorial,
        }
    }

    fn result(title: &str) -> GenerationResult {
        GenerationResult {
            title: title.to_string(),
            content: "# body".to_string(),
            hashtags: vec!["x".to_string()],
            meta_description: "meta".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let (repo, _dir) = setup().await;
        repo.insert("u1", &params("first"), &result("1")).await.unwrap();
        repo.insert("u1", &params("second"), &result("2")).await.unwrap();
        repo.insert("u2", &params("other"), &result("3")).await.unwrap();

        let items = repo.find_by_user_id("u1", 50).await.unwrap();
        let topics: Vec<&str> = items.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(topics, vec!["second", "first"]);
        assert_eq!(items[0].keywords, vec!["a", "b"]);
        assert!(items.iter().all(|r| r.id.is_some()));

        let limited = repo.find_by_user_id("u1", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let (repo, _dir) = setup().await;
        let record = repo.insert("u1", &params("mine"), &result("1")).await.unwrap();
        let id = record.id.unwrap();

        assert!(!repo.delete_by_id(&id, "u2").await.unwrap());
        assert!(repo.delete_by_id(&id, "u1").await.unwrap());
        assert!(!repo.delete_by_id(&id, "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_bad_rows_are_tolerated() {
        let (repo, _dir) = setup().await;
        sqlx::query(
            "INSERT INTO blog_history (id, user_id, topic, keywords, style, result, created_at) VALUES ('bad-style', 'u1', 't', '[]', 'essay', NULL, '2024-01-01T00:00:00Z'), ('no-result', 'u1', 't', '[]', 'til', '{oops', '2024-01-02T00:00:00Z')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let items = repo.find_by_user_id("u1", 50).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_deref(), Some("no-result"));
        assert!(items[0].result.is_none());
    }

    #[tokio::test]
    async fn test_delete_all_for_user() {
        let (repo, _dir) = setup().await;
        repo.insert("u1", &params("a"), &result("1")).await.unwrap();
        repo.insert("u1", &params("b"), &result("2")).await.unwrap();
        repo.insert("u2", &params("c"), &result("3")).await.unwrap();

        assert_eq!(repo.delete_all_for_user("u1").await.unwrap(), 2);
        assert_eq!(repo.count_all().await.unwrap(), 1);
    }
}
