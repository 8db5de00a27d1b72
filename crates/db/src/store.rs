//! The favorites store seam used by the API layer.
//!
//! [`PgFavoriteStore`] is the production implementation. [`MemoryFavoriteStore`]
//! keeps the same upsert-by-event-id semantics in a map and backs tests that
//! run without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::favorite::{Favorite, NewFavorite};
use crate::repositories::FavoriteRepo;
use crate::DbPool;

/// Persistent keyed collection of favorited events.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites, newest `added_at` first.
    async fn list(&self) -> Result<Vec<Favorite>, sqlx::Error>;

    /// Create or replace the favorite for `favorite.event_id`, refreshing
    /// `added_at`.
    async fn upsert(&self, favorite: &NewFavorite) -> Result<Favorite, sqlx::Error>;

    /// Remove the favorite if present. Returns whether anything was removed.
    async fn delete(&self, event_id: &str) -> Result<bool, sqlx::Error>;

    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// Favorites stored in the `favorites` table.
#[derive(Clone)]
pub struct PgFavoriteStore {
    pool: DbPool,
}

impl PgFavoriteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for PgFavoriteStore {
    async fn list(&self) -> Result<Vec<Favorite>, sqlx::Error> {
        FavoriteRepo::list(&self.pool).await
    }

    async fn upsert(&self, favorite: &NewFavorite) -> Result<Favorite, sqlx::Error> {
        FavoriteRepo::upsert(&self.pool, favorite).await
    }

    async fn delete(&self, event_id: &str) -> Result<bool, sqlx::Error> {
        FavoriteRepo::delete(&self.pool, event_id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Favorites held in process memory.
#[derive(Default)]
pub struct MemoryFavoriteStore {
    records: Mutex<HashMap<String, Favorite>>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, Favorite>> {
        // A poisoned map is still a consistent map: every mutation below is a
        // single insert or remove.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn list(&self) -> Result<Vec<Favorite>, sqlx::Error> {
        let mut all: Vec<Favorite> = self.records().values().cloned().collect();
        all.sort_by(|a, b| {
            b.added_at
                .cmp(&a.added_at)
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        Ok(all)
    }

    async fn upsert(&self, favorite: &NewFavorite) -> Result<Favorite, sqlx::Error> {
        let record = Favorite {
            event_id: favorite.event_id.clone(),
            name: favorite.name.clone(),
            date: favorite.date.clone(),
            time: favorite.time.clone(),
            venue: favorite.venue.clone(),
            genre: favorite.genre.clone(),
            image_url: favorite.image_url.clone(),
            added_at: chrono::Utc::now(),
        };
        self.records()
            .insert(record.event_id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, event_id: &str) -> Result<bool, sqlx::Error> {
        Ok(self.records().remove(event_id).is_some())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
