//! Interactive session wiring user actions to the catalog and presenter
//!
//! A session reacts to two actions: submitting a search and activating the
//! "Episodes" entry of a show card. Every outbound request is issued under a
//! [`RequestTicket`]; a response is only rendered when its ticket is still
//! the latest one for its display region, so a slow, superseded response can
//! never overwrite newer results.
//!
//! [`Session::submit_search`] and [`Session::request_episodes`] block until
//! the catalog answers, so their tickets are always current when finished.
//! The guard only discards anything for callers that drive requests
//! themselves through `begin_*` and `finish_*`.

use crate::catalog::{CatalogError, CatalogProvider, Episode, ShowId, ShowSummary, is_blank_query};
use crate::presenter::Presenter;
use tracing::{debug, info, warn};

/// Receives user-visible failure notifications
///
/// Implementations are expected to block until the user has seen the message.
pub trait Notifier {
    fn alert(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Display region a request renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The grid of show cards
    Shows,
    /// The episode section
    Episodes,
}

/// Marks an issued request with its region and generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    region: Region,
    generation: u64,
}

impl RequestTicket {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a user action ended up doing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing was requested (blank query, or no card at the given index)
    Aborted,
    /// The response was rendered
    Applied,
    /// The request failed and the user was alerted
    Failed,
    /// A newer request superseded this one; its response was dropped
    Discarded,
}

/// Connects user actions to a catalog and a presenter
pub struct Session<P, N>
where
    P: CatalogProvider,
    N: Notifier,
{
    catalog: P,
    notifier: N,
    presenter: Presenter,
    /// Last generation handed out, across both regions
    generation: u64,
    latest_search: u64,
    latest_episodes: u64,
}

impl<P, N> Session<P, N>
where
    P: CatalogProvider,
    N: Notifier,
{
    /// Creates a new session rendering into `presenter`
    pub fn new(catalog: P, notifier: N, presenter: Presenter) -> Self {
        Self {
            catalog,
            notifier,
            presenter,
            generation: 0,
            latest_search: 0,
            latest_episodes: 0,
        }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Handles a submitted search
    ///
    /// Hides the episode section first. A blank query stops there without
    /// contacting the catalog. A failed search alerts the user and leaves an
    /// empty grid.
    pub fn submit_search(&mut self, query: &str) -> ActionOutcome {
        self.presenter.hide_episodes();

        if is_blank_query(query) {
            debug!("ignoring blank search query");
            return ActionOutcome::Aborted;
        }

        let ticket = self.begin_search();
        info!(query, generation = ticket.generation, "searching catalog");
        let result = self.catalog.search_shows(query);

        self.finish_search(ticket, result)
    }

    /// Handles activation of the "Episodes" entry of the card at `card_index`
    pub fn activate_episodes(&mut self, card_index: usize) -> ActionOutcome {
        let Some(show_id) = self.presenter.show_id_at(card_index) else {
            debug!(card_index, "no show card at index");
            return ActionOutcome::Aborted;
        };

        self.request_episodes(show_id)
    }

    /// Fetches and renders the episodes of `show_id`
    pub fn request_episodes(&mut self, show_id: ShowId) -> ActionOutcome {
        let ticket = self.begin_episodes();
        info!(%show_id, generation = ticket.generation, "fetching episodes");
        let result = self.catalog.get_episodes(show_id);

        self.finish_episodes(ticket, result)
    }

    /// Issues a ticket for a new search
    ///
    /// Supersedes every earlier search and any episode request still pending,
    /// since a search hides the episode section.
    pub fn begin_search(&mut self) -> RequestTicket {
        let generation = self.next_generation();
        self.latest_search = generation;
        // No episode ticket carries a search generation, so all pending
        // episode responses become stale.
        self.latest_episodes = generation;

        RequestTicket {
            region: Region::Shows,
            generation,
        }
    }

    /// Issues a ticket for a new episode request
    pub fn begin_episodes(&mut self) -> RequestTicket {
        let generation = self.next_generation();
        self.latest_episodes = generation;

        RequestTicket {
            region: Region::Episodes,
            generation,
        }
    }

    /// Returns true if `ticket` is the latest issued for its region
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        match ticket.region {
            Region::Shows => ticket.generation == self.latest_search,
            Region::Episodes => ticket.generation == self.latest_episodes,
        }
    }

    /// Applies the response of the search issued under `ticket`
    pub fn finish_search(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ShowSummary>, CatalogError>,
    ) -> ActionOutcome {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "discarding stale search response");
            return ActionOutcome::Discarded;
        }

        match result {
            Ok(shows) => {
                self.presenter.render_shows(Some(shows.as_slice()));
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("search failed: {}", e);
                self.notifier.alert(&format!("Show search failed: {}", e));
                self.presenter.render_shows(None);
                ActionOutcome::Failed
            }
        }
    }

    /// Applies the response of the episode request issued under `ticket`
    ///
    /// On failure the user is alerted and the episode section is left as it was.
    pub fn finish_episodes(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Episode>, CatalogError>,
    ) -> ActionOutcome {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "discarding stale episode response");
            return ActionOutcome::Discarded;
        }

        match result {
            Ok(episodes) => {
                self.presenter.render_episodes(&episodes);
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("episode lookup failed: {}", e);
                self.notifier.alert(&format!("Could not load episodes: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
