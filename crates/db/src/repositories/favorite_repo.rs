//! Repository for the `favorites` table.

use sqlx::PgPool;

use crate::models::favorite::{Favorite, NewFavorite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "event_id, name, date, time, venue, genre, image_url, added_at";

/// Provides list / upsert / delete for favorited events.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// List every favorite, most recently added first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM favorites ORDER BY added_at DESC, event_id");
        sqlx::query_as::<_, Favorite>(&query).fetch_all(pool).await
    }

    /// Insert a favorite or replace the existing one with the same event id.
    ///
    /// Every column is overwritten on conflict and `added_at` is reset, so a
    /// re-favorited event moves to the top of the list.
    pub async fn upsert(pool: &PgPool, input: &NewFavorite) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (event_id, name, date, time, venue, genre, image_url, added_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
             ON CONFLICT (event_id) DO UPDATE SET
                 name = EXCLUDED.name,
                 date = EXCLUDED.date,
                 time = EXCLUDED.time,
                 venue = EXCLUDED.venue,
                 genre = EXCLUDED.genre,
                 image_url = EXCLUDED.image_url,
                 added_at = EXCLUDED.added_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(&input.event_id)
            .bind(&input.name)
            .bind(&input.date)
            .bind(&input.time)
            .bind(&input.venue)
            .bind(&input.genre)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Delete a favorite. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, event_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE event_id = $1")
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
