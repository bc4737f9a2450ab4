use anyhow::Result;
use async_trait::async_trait;
use sqlx::{query, query_as, sqlite::SqlitePool};

use crate::domain::TrainingExample;

/// Append-only sink for labelled examples. Nothing in this crate reads it back.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn append(&self, examples: &[TrainingExample]) -> Result<()>;

    async fn close(&self) {}
}

#[derive(Clone)]
pub struct FeedbackRepository {
    pool: SqlitePool,
}

impl FeedbackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = query_as(r#"SELECT COUNT(*) FROM training_examples"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[cfg(test)]
    pub async fn recent(&self, limit: i64) -> Result<Vec<TrainingExample>> {
        let rows: Vec<(String, String, chrono::DateTime<chrono::Utc>)> = query_as(
            r#"SELECT text, label, created_at FROM training_examples ORDER BY id DESC LIMIT ?1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(text, label, created_at)| TrainingExample {
                text,
                label,
                created_at,
            })
            .collect())
    }
}

#[async_trait]
impl FeedbackStore for FeedbackRepository {
    async fn append(&self, examples: &[TrainingExample]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for example in examples {
            query(
                r#"INSERT INTO training_examples (text, label, created_at) VALUES (?1, ?2, ?3)"#,
            )
            .bind(&example.text)
            .bind(&example.label)
            .bind(example.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_pool;

    #[tokio::test]
    async fn appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_pool(&dir.path().join("feedback.db")).await.unwrap();
        let repo = FeedbackRepository::new(pool);

        repo.append(&[
            TrainingExample::new("server down", "urgent"),
            TrainingExample::new("monthly digest", "low"),
        ])
        .await
        .unwrap();
        repo.append(&[]).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        let recent = repo.recent(1).await.unwrap();
        assert_eq!(recent[0].text, "monthly digest");
        assert_eq!(recent[0].label, "low");
        repo.close().await;
    }

    #[tokio::test]
    async fn reopening_keeps_examples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.db");

        let repo = FeedbackRepository::new(init_pool(&path).await.unwrap());
        repo.append(&[TrainingExample::new("call me", "normal")])
            .await
            .unwrap();
        repo.close().await;

        let reopened = FeedbackRepository::new(init_pool(&path).await.unwrap());
        assert_eq!(reopened.count().await.unwrap(), 1);
    }
}
