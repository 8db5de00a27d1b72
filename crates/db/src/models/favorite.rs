//! Favorite record model and DTOs.

use gigscout_core::error::CoreError;
use gigscout_core::favorite::validate_favorite_input;
use gigscout_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `favorites` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub event_id: String,
    pub name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub added_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /api/favorites`.
///
/// Every field is optional at the wire level so a missing `eventId` or `name`
/// surfaces as a validation error instead of a deserialization rejection.
/// Clients posting an Event Summary send `id`, which is accepted too; when
/// both are present a non-blank `eventId` wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFavorite {
    pub event_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

/// A validated favorite ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub event_id: String,
    pub name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<UpsertFavorite> for NewFavorite {
    type Error = CoreError;

    fn try_from(input: UpsertFavorite) -> Result<Self, Self::Error> {
        let event_id = input
            .event_id
            .filter(|id| !id.trim().is_empty())
            .or(input.id);
        validate_favorite_input(event_id.as_deref(), input.name.as_deref())?;

        Ok(Self {
            event_id: event_id.unwrap_or_default(),
            name: input.name.unwrap_or_default(),
            date: input.date,
            time: input.time,
            venue: input.venue,
            genre: input.genre,
            image_url: input.image_url,
        })
    }
}
