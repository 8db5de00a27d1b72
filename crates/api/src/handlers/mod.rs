pub mod events;
pub mod favorites;
pub mod spotify;
