/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Only the fields this crate reads are declared; everything else is ignored.
use super::{EpisodeId, ShowId};
use serde::Deserialize;

/// One entry of the `/search/shows` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show record as nested in a search result.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: ShowId,
    pub name: String,
    /// Summary in HTML format (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    /// Image links (null when the show has no artwork)
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

/// Image links of a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
}

/// A single episode from the `/shows/<id>/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    #[serde(default)]
    pub id: Option<EpisodeId>,
    /// Episode title (may be null for episodes without a title)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    /// Episode number within the season (null for specials)
    #[serde(default)]
    pub number: Option<u32>,
}
