//! ShowFinder - Search a TV catalog and browse episode listings
//!
//! This library provides the catalog client for the TVMaze API, the presenter
//! that owns what is currently on display, and the session that connects
//! user actions to both.

mod catalog;
mod presenter;
mod session;

pub use catalog::{
    CatalogConfig, CatalogError, CatalogProvider, DEFAULT_BASE_URL, Episode, EpisodeId,
    FALLBACK_IMAGE_URL, ShowId, ShowSummary, TvMazeCatalog, is_blank_query,
};
pub use presenter::{Presenter, ShowCard, SummaryFormat, format_episode_line};
pub use session::{ActionOutcome, Notifier, Region, RequestTicket, Session};

use std::io;
use thiserror::Error;

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error during a catalog lookup
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error while reading user input
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Error while encoding output as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Opens an interactive session against the TVMaze catalog
///
/// # Arguments
///
/// * `config` - Connection settings for the catalog
/// * `summary_format` - How show summaries are displayed
/// * `notifier` - Receives alerts for failed lookups
///
/// # Examples
///
/// ```no_run
/// use show_finder::{CatalogConfig, Notifier, SummaryFormat, open_session};
///
/// struct Stderr;
///
/// impl Notifier for Stderr {
///     fn alert(&self, message: &str) {
///         eprintln!("{}", message);
///     }
/// }
///
/// let mut session = open_session(&CatalogConfig::default(), SummaryFormat::PlainText, Stderr)?;
/// session.submit_search("batman");
/// session.activate_episodes(0);
///
/// for line in session.presenter().episode_lines() {
///     println!("{}", line);
/// }
/// # Ok::<(), show_finder::ShowFinderError>(())
/// ```
pub fn open_session<N: Notifier>(
    config: &CatalogConfig,
    summary_format: SummaryFormat,
    notifier: N,
) -> Result<Session<TvMazeCatalog, N>, ShowFinderError> {
    let catalog = TvMazeCatalog::new(config)?;

    Ok(Session::new(catalog, notifier, Presenter::new(summary_format)))
}
