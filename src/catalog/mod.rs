//! Catalog client for TV show and episode lookups.
//!
//! This module provides the internal record shapes for shows and episodes,
//! the errors a catalog lookup can fail with, and the trait implemented by
//! catalog backends.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeCatalog;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Base URL of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Placeholder image used whenever the catalog has no image for a show
pub const FALLBACK_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be built or sent, or the connection failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The catalog answered with a non-success status
    #[error("Catalog returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// A search was attempted with an empty or blank term
    #[error("Search term must not be empty")]
    EmptyQuery,

    /// The catalog settings cannot be used
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

/// Opaque identifier of a show in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(u64);

impl ShowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of an episode in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(u64);

impl EpisodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A show as returned by a search, reduced to what gets displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSummary {
    /// Catalog identifier of the show
    pub id: ShowId,
    /// Display title
    pub name: String,
    /// Description, possibly containing HTML markup
    pub summary: Option<String>,
    /// Medium-size image URL, or [`FALLBACK_IMAGE_URL`]
    pub image: String,
}

/// A single episode of a show.
///
/// Fields the catalog leaves out stay `None`; nothing is substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    /// Catalog identifier of the episode
    pub id: Option<EpisodeId>,
    /// Episode title
    pub name: Option<String>,
    /// Season number
    pub season: Option<u32>,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
}

/// Connection settings for a catalog backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// Image URL substituted for shows without an image
    pub fallback_image: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fallback_image: FALLBACK_IMAGE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Trait for catalogs that can search shows and list their episodes.
///
/// Both operations report failure through [`CatalogError`]; callers decide
/// how to surface it.
pub trait CatalogProvider {
    /// Searches the catalog for shows matching `query`.
    ///
    /// The result keeps the catalog's relevance order.
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError>;

    /// Lists all episodes of the show with the given identifier, in catalog order.
    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for &T {
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
        (**self).search_shows(query)
    }

    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError> {
        (**self).get_episodes(show_id)
    }
}

/// Returns true if `query` has nothing to search for.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank_query() {
        assert!(is_blank_query(""));
        assert!(is_blank_query("   \t"));
        assert!(!is_blank_query("batman"));
        assert!(!is_blank_query("  the wire "));
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let episode = Episode {
            id: Some(EpisodeId::new(1)),
            name: Some("Pilot".to_string()),
            season: Some(1),
            number: None,
        };
        let json = serde_json::to_value(&episode).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Pilot", "season": 1, "number": null})
        );
        assert_eq!(ShowId::new(5).to_string(), "5");
    }
}
