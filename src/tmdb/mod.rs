//! TMDB API client, wire types, and domain model.

pub mod api_types;
pub mod cache;
pub mod cached_client;
pub mod client;
pub mod genres;
pub mod types;

pub use cached_client::CachedTmdbClient;
pub use types::{HomepageContent, MediaItem, MediaType, Section};
