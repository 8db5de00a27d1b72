//! Domain types and rules shared by the gigscout service and client.
//!
//! This crate has no I/O. It holds the Event Summary shape, favorites input
//! validation, category mapping and the suggestion payload helpers so the API
//! layer and the client library agree on them.

pub mod category;
pub mod error;
pub mod event;
pub mod favorite;
pub mod suggest;
pub mod types;
