//! HTTP clients for the third-party providers gigscout proxies.
//!
//! - [`ticketing::TicketmasterClient`] -- event search, detail and keyword
//!   suggestions (API key as a query parameter).
//! - [`music::SpotifyClient`] -- artist search, detail and albums, authorised
//!   with a bearer token from [`token::TokenProvider`].
//!
//! Both return provider JSON unmodified; shaping is left to callers.

mod http;
pub mod music;
pub mod ticketing;
pub mod token;
