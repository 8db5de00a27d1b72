//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod favorite_repo;

pub use favorite_repo::FavoriteRepo;
