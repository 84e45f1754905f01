/// TVMaze catalog implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult};
use super::{
    CatalogConfig, CatalogError, CatalogProvider, Episode, ShowId, ShowSummary, is_blank_query,
};
use reqwest::blocking::{Client, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Catalog backed by the TVMaze REST API.
///
/// Uses the `/search/shows` endpoint for keyword searches and
/// `/shows/<id>/episodes` for episode listings.
pub struct TvMazeCatalog {
    client: Client,
    base_url: String,
    fallback_image: String,
}

impl TvMazeCatalog {
    /// Creates a new TVMaze catalog with its own HTTP client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        Self::with_client(client, config)
    }

    /// Creates a TVMaze catalog that sends its requests through `client`.
    ///
    /// Fails if the fallback image is blank, since every show must end up
    /// with a non-empty image URL.
    pub fn with_client(client: Client, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let fallback_image = config.fallback_image.trim();
        if fallback_image.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "fallback image URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fallback_image: fallback_image.to_string(),
        })
    }

    fn search_request(&self, query: &str) -> Result<Request, CatalogError> {
        self.client
            .get(format!("{}/search/shows", self.base_url))
            .query(&[("q", query)])
            .build()
            .map_err(|e| CatalogError::RequestError(e.to_string()))
    }

    fn episodes_request(&self, show_id: ShowId) -> Result<Request, CatalogError> {
        self.client
            .get(format!("{}/shows/{}/episodes", self.base_url, show_id))
            .build()
            .map_err(|e| CatalogError::RequestError(e.to_string()))
    }

    /// Sends `request` and decodes the JSON body.
    fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, CatalogError> {
        let url = request.url().to_string();
        debug!(%url, "sending catalog request");

        let response = self
            .client
            .execute(request)
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .map_err(|e| CatalogError::ParseError(e.to_string()))
    }

    /// Converts a search result to a ShowSummary, substituting the fallback image.
    fn convert_show(&self, result: TvMazeSearchResult) -> ShowSummary {
        let show = result.show;
        let image = show
            .image
            .and_then(|image| image.medium)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.fallback_image.clone());

        ShowSummary {
            id: show.id,
            name: show.name,
            summary: show.summary,
            image,
        }
    }

    fn convert_episode(episode: TvMazeEpisode) -> Episode {
        Episode {
            id: episode.id,
            name: episode.name,
            season: episode.season,
            number: episode.number,
        }
    }
}

impl CatalogProvider for TvMazeCatalog {
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
        if is_blank_query(query) {
            return Err(CatalogError::EmptyQuery);
        }

        let request = self.search_request(query)?;
        let results: Vec<TvMazeSearchResult> = self.fetch(request)?;
        debug!(query, count = results.len(), "search results received");

        Ok(results
            .into_iter()
            .map(|result| self.convert_show(result))
            .collect())
    }

    fn get_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError> {
        let request = self.episodes_request(show_id)?;
        let episodes: Vec<TvMazeEpisode> = self.fetch(request)?;
        debug!(%show_id, count = episodes.len(), "episodes received");

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}
