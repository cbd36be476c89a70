use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// Favourite-genre storage keyed by opaque session identity
///
/// One row per identity holding a JSON-encoded genre list; a put replaces
/// the whole list.
#[derive(Clone)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored favourite genres; an unknown identity has none
    pub async fn get(&self, session_id: &str) -> AppResult<Vec<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT favorite_genres FROM user_preferences WHERE session_id = ?")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((json,)) => serde_json::from_str(&json)
                .map_err(|e| AppError::Internal(format!("Corrupt preference row: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the stored genres for an identity
    pub async fn put(&self, session_id: &str, genres: &[String]) -> AppResult<()> {
        let json = serde_json::to_string(genres)
            .map_err(|e| AppError::Internal(format!("Failed to encode genres: {}", e)))?;

        sqlx::query(
            "INSERT INTO user_preferences (session_id, favorite_genres) VALUES (?, ?) \
             ON CONFLICT(session_id) DO UPDATE SET favorite_genres = excluded.favorite_genres",
        )
        .bind(session_id)
        .bind(json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
