//! Presenter for show cards and episode listings
//!
//! The presenter owns everything currently on display: the grid of show
//! cards and the episode section. Each render call replaces the previous
//! content wholesale, so rendering the same input twice leaves the same state.

use crate::catalog::{Episode, ShowId, ShowSummary};
use std::io::{self, Write};
use tracing::debug;

/// How show summaries coming from the catalog are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Strip the HTML markup and display plain text
    #[default]
    PlainText,
    /// Display the summary exactly as the catalog provides it
    Markup,
}

/// A rendered show, tagged with the identifier of the show it displays
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    /// Identifier used to look up the show's episodes
    pub show_id: ShowId,
    /// Image URL
    pub image: String,
    /// Display title
    pub name: String,
    /// Summary text, empty when the show has none
    pub summary: String,
}

impl ShowCard {
    /// Label of the card's "Episodes" entry
    pub fn episodes_label(&self) -> String {
        format!("Episodes: {}", self.name)
    }
}

/// Owns and renders the visible show grid and episode section
#[derive(Debug, Default)]
pub struct Presenter {
    summary_format: SummaryFormat,
    cards: Vec<ShowCard>,
    episode_lines: Vec<String>,
    episodes_visible: bool,
}

impl Presenter {
    /// Creates a presenter with an empty grid and a hidden episode section
    pub fn new(summary_format: SummaryFormat) -> Self {
        Self {
            summary_format,
            ..Self::default()
        }
    }

    /// Replaces the show grid with one card per show
    ///
    /// An absent list (e.g. after a failed search) renders an empty grid.
    pub fn render_shows(&mut self, shows: Option<&[ShowSummary]>) {
        self.cards = shows
            .unwrap_or_default()
            .iter()
            .map(|show| ShowCard {
                show_id: show.id,
                image: show.image.clone(),
                name: show.name.clone(),
                summary: self.format_summary(show.summary.as_deref()),
            })
            .collect();

        debug!(cards = self.cards.len(), "rendered show grid");
    }

    /// Replaces the episode listing and reveals the episode section
    pub fn render_episodes(&mut self, episodes: &[Episode]) {
        self.episode_lines = episodes.iter().map(format_episode_line).collect();
        self.episodes_visible = true;

        debug!(lines = self.episode_lines.len(), "rendered episode list");
    }

    /// Hides the episode section without touching its content
    pub fn hide_episodes(&mut self) {
        self.episodes_visible = false;
    }

    /// Returns the show identifier the card at `index` is tagged with
    pub fn show_id_at(&self, index: usize) -> Option<ShowId> {
        self.cards.get(index).map(|card| card.show_id)
    }

    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    pub fn episode_lines(&self) -> &[String] {
        &self.episode_lines
    }

    pub fn episodes_visible(&self) -> bool {
        self.episodes_visible
    }

    /// Writes the show grid to `out`
    pub fn write_shows<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.cards.is_empty() {
            writeln!(out, "No shows found.")?;
            return Ok(());
        }

        for card in &self.cards {
            writeln!(out, "[{}] {}", card.show_id, card.name)?;
            writeln!(out, "  Image: {}", card.image)?;
            if !card.summary.is_empty() {
                writeln!(out, "  {}", card.summary)?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    /// Writes the episode section to `out` if it is visible
    pub fn write_episodes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.episodes_visible {
            return Ok(());
        }

        writeln!(out, "=== Episodes ===")?;
        for line in &self.episode_lines {
            writeln!(out, "- {}", line)?;
        }
        writeln!(out)?;

        Ok(())
    }

    fn format_summary(&self, summary: Option<&str>) -> String {
        match (summary, self.summary_format) {
            (None, _) => String::new(),
            (Some(text), SummaryFormat::Markup) => text.to_string(),
            (Some(text), SummaryFormat::PlainText) => {
                nanohtml2text::html2text(text).trim().to_string()
            }
        }
    }
}

/// Formats an episode as `<name> (season <season>, number <number>)`
///
/// Fields the catalog left out are shown as `unknown`.
pub fn format_episode_line(episode: &Episode) -> String {
    format!(
        "{} (season {}, number {})",
        episode.name.as_deref().unwrap_or("unknown"),
        display_or_unknown(episode.season),
        display_or_unknown(episode.number)
    )
}

fn display_or_unknown(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EpisodeId, FALLBACK_IMAGE_URL};

    fn show(id: u64, name: &str, summary: Option<&str>) -> ShowSummary {
        ShowSummary {
            id: ShowId::new(id),
            name: name.to_string(),
            summary: summary.map(str::to_string),
            image: FALLBACK_IMAGE_URL.to_string(),
        }
    }

    fn pilot() -> Episode {
        Episode {
            id: Some(EpisodeId::new(1)),
            name: Some("Pilot".to_string()),
            season: Some(1),
            number: Some(1),
        }
    }

    #[test]
    fn test_render_shows_replaces_previous_cards() {
        let mut presenter = Presenter::new(SummaryFormat::PlainText);
        let first = [show(1, "Batman", None), show(2, "Robin", None)];
        presenter.render_shows(Some(first.as_slice()));
        presenter.render_shows(Some([show(3, "Alfred", None)].as_slice()));

        assert_eq!(presenter.cards().len(), 1);
        assert_eq!(presenter.cards()[0].name, "Alfred");
        assert_eq!(presenter.show_id_at(0), Some(ShowId::new(3)));
        assert_eq!(presenter.show_id_at(1), None);
    }

    #[test]
    fn test_render_empty_is_idempotent() {
        let mut presenter = Presenter::new(SummaryFormat::PlainText);
        presenter.render_shows(Some([show(1, "Batman", None)].as_slice()));

        presenter.render_shows(Some([].as_slice()));
        assert!(presenter.cards().is_empty());

        presenter.render_shows(Some([].as_slice()));
        assert!(presenter.cards().is_empty());

        presenter.render_shows(None);
        assert!(presenter.cards().is_empty());
    }

    #[test]
    fn test_summary_formats() {
        let html = Some("<p>The Caped Crusader.</p>");

        let mut plain = Presenter::new(SummaryFormat::PlainText);
        let shows = [show(1, "Batman", html), show(2, "Robin", None)];
        plain.render_shows(Some(shows.as_slice()));
        assert_eq!(plain.cards()[0].summary, "The Caped Crusader.");
        assert_eq!(plain.cards()[1].summary, "");

        let mut markup = Presenter::new(SummaryFormat::Markup);
        markup.render_shows(Some([show(1, "Batman", html)].as_slice()));
        assert_eq!(markup.cards()[0].summary, "<p>The Caped Crusader.</p>");
    }

    #[test]
    fn test_format_episode_line() {
        assert_eq!(format_episode_line(&pilot()), "Pilot (season 1, number 1)");

        let special = Episode {
            id: Some(EpisodeId::new(7)),
            name: None,
            season: Some(2),
            number: None,
        };
        assert_eq!(
            format_episode_line(&special),
            "unknown (season 2, number unknown)"
        );
    }

    #[test]
    fn test_render_episodes_reveals_section() {
        let mut presenter = Presenter::new(SummaryFormat::PlainText);
        assert!(!presenter.episodes_visible());

        presenter.render_episodes(&[pilot()]);
        assert!(presenter.episodes_visible());
        assert_eq!(presenter.episode_lines(), ["Pilot (season 1, number 1)"]);

        presenter.hide_episodes();
        presenter.render_episodes(&[]);
        assert!(presenter.episodes_visible());
        assert!(presenter.episode_lines().is_empty());
    }

    #[test]
    fn test_write_output() {
        let mut presenter = Presenter::new(SummaryFormat::PlainText);
        let shows = [show(5, "Batman", Some("<p>Gotham.</p>"))];
        presenter.render_shows(Some(shows.as_slice()));
        presenter.render_episodes(&[pilot()]);

        let mut out = Vec::new();
        presenter.write_shows(&mut out).unwrap();
        presenter.write_episodes(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("[5] Batman"));
        assert!(text.contains(&format!("Image: {}", FALLBACK_IMAGE_URL)));
        assert!(text.contains("Gotham."));
        assert!(text.contains("- Pilot (season 1, number 1)"));

        presenter.hide_episodes();
        let mut hidden = Vec::new();
        presenter.write_episodes(&mut hidden).unwrap();
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_write_empty_grid() {
        let presenter = Presenter::new(SummaryFormat::PlainText);
        let mut out = Vec::new();
        presenter.write_shows(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No shows found.\n");
    }
}
