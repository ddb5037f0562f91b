//! # Collaborator Module
//!
//! Client side of the gender-analysis service. The service owns the Spotify
//! OAuth flow and the gender classification; this crate only talks to three
//! of its endpoints:
//!
//! - `GET /login` returns the Spotify authorization URL to open
//! - `GET /top-artists-gender` returns the classified top artists for a
//!   session and time range
//! - `GET /health` reports whether the service is up
//!
//! [`ArtistSource`] is the seam the load orchestrator depends on, so the
//! caching logic can run against [`HttpCollaborator`] in production and
//! against an in-memory source in tests.

mod http;

use async_trait::async_trait;

pub use http::HttpCollaborator;

use crate::{
    error::FetchError,
    session::Session,
    types::{Artist, TimeRange},
};

/// Anything that can produce the top artists of a session for a range.
#[async_trait]
pub trait ArtistSource: Send + Sync {
    async fn top_artists(
        &self,
        session: &Session,
        range: TimeRange,
    ) -> Result<Vec<Artist>, FetchError>;
}
