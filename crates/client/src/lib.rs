//! Session-side library for talking to the gigscout API.
//!
//! - [`api::ApiClient`] -- typed wrapper over the `/api` routes.
//! - [`favorites::FavoritesManager`] -- optimistic, session-wide favorites
//!   mirror with rollback on remote failure.
//! - [`search::EventSearcher`] -- the search form flow: validation, origin
//!   resolution through [`geo::GeoLocator`], and result mapping.
//! - [`notify`] -- the notification surface the manager reports through.

pub mod api;
pub mod config;
pub mod favorites;
pub mod geo;
mod http;
pub mod notify;
pub mod search;
