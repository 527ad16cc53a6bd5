//! Emotion tag persistence
//!
//! Tags live in a single SQLite table. Rows are append-only: there is no
//! update or delete path outside of [`TagStore::clear`], which exists for
//! test isolation.
//!
//! Creates are serialized through an async mutex so the
//! check → insert → read-back sequence runs as one unit; each insert is also
//! its own transaction, so readers never observe a partial row.

use crate::models::EmotionTag;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

const SELECT_TAG: &str =
    "SELECT id, track_id, user_id, emotion, intensity, notes FROM emotion_tags";

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A tag with this id already exists
    #[error("tag id already exists: {0}")]
    Duplicate(String),

    /// Backend unavailable or write failed
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Handle to the emotion tag table
///
/// Cheap to clone; clones share the pool and the write lock.
#[derive(Clone)]
pub struct TagStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl TagStore {
    /// Wrap a pool, creating the `emotion_tags` table if needed
    pub async fn open(pool: SqlitePool) -> Result<Self, StoreError> {
        // seq preserves insertion order independently of caller-chosen ids
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS emotion_tags (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                track_id TEXT NOT NULL,
                user_id TEXT,
                emotion TEXT NOT NULL,
                intensity REAL,
                notes TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        info!("Emotion tag table ready");

        Ok(Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Persist a validated tag and return the stored row
    ///
    /// Fails with [`StoreError::Duplicate`] if the id is taken; the existing
    /// record is left untouched.
    pub async fn insert(&self, tag: &EmotionTag) -> Result<EmotionTag, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT seq FROM emotion_tags WHERE id = ?")
            .bind(&tag.id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(StoreError::Duplicate(tag.id.clone()));
        }

        sqlx::query(
            "INSERT INTO emotion_tags (id, track_id, user_id, emotion, intensity, notes) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&tag.id)
        .bind(&tag.track_id)
        .bind(&tag.user_id)
        .bind(&tag.emotion)
        .bind(tag.intensity)
        .bind(&tag.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(tag.id.clone())
            }
            other => StoreError::Storage(other),
        })?;

        let stored = sqlx::query_as::<_, EmotionTag>(&format!("{SELECT_TAG} WHERE id = ?"))
            .bind(&tag.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id = %stored.id, track_id = %stored.track_id, "Stored emotion tag");
        Ok(stored)
    }

    /// All tags in insertion order
    pub async fn list(&self) -> Result<Vec<EmotionTag>, StoreError> {
        let tags = sqlx::query_as::<_, EmotionTag>(&format!("{SELECT_TAG} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    /// Tag with the given id, if stored
    pub async fn get(&self, id: &str) -> Result<Option<EmotionTag>, StoreError> {
        let tag = sqlx::query_as::<_, EmotionTag>(&format!("{SELECT_TAG} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tag)
    }

    /// Number of stored tags
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emotion_tags")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Remove every stored tag
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query("DELETE FROM emotion_tags")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
