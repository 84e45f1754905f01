use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use show_finder::{
    ActionOutcome, CatalogConfig, CatalogProvider, DEFAULT_BASE_URL, FALLBACK_IMAGE_URL,
    Notifier, Presenter, Session, ShowCard, ShowFinderError, ShowId, SummaryFormat,
    TvMazeCatalog, is_blank_query, open_session,
};
use std::io::{self, Write};
use std::process;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Search the TVMaze catalog for TV shows and browse their episodes
#[derive(Debug, Parser)]
#[command(name = "show-finder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the catalog API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Image URL shown for shows without artwork
    #[arg(
        long,
        global = true,
        default_value = FALLBACK_IMAGE_URL,
        value_parser = NonEmptyStringValueParser::new()
    )]
    fallback_image: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Show summaries with their HTML markup instead of plain text
    #[arg(long, global = true)]
    raw_summaries: bool,

    /// Log catalog requests and rendering to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search shows once and print the results
    Search {
        /// Search term
        query: String,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the episodes of a show
    Episodes {
        /// Catalog identifier of the show
        show_id: u64,

        /// Print the episodes as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.api_url.clone(),
            fallback_image: self.fallback_image.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    fn summary_format(&self) -> SummaryFormat {
        if self.raw_summaries {
            SummaryFormat::Markup
        } else {
            SummaryFormat::PlainText
        }
    }
}

/// Prints alerts to stderr and waits until the user acknowledges them
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("\n⚠️  {}", message);
        if let Err(e) = Input::<String>::new()
            .with_prompt("Press Enter to continue")
            .allow_empty(true)
            .interact_text()
        {
            warn!("could not wait for alert acknowledgement: {}", e);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "show_finder=debug"
    } else {
        "show_finder=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ShowFinderError> {
    let config = cli.catalog_config();
    let summary_format = cli.summary_format();

    match cli.command {
        None => run_interactive(&config, summary_format),
        Some(Command::Search { query, json }) => {
            run_search(&config, summary_format, &query, json)
        }
        Some(Command::Episodes { show_id, json }) => {
            run_episodes(&config, summary_format, ShowId::new(show_id), json)
        }
    }
}

fn run_search(
    config: &CatalogConfig,
    summary_format: SummaryFormat,
    query: &str,
    json: bool,
) -> Result<(), ShowFinderError> {
    if is_blank_query(query) {
        return Ok(());
    }

    let shows = TvMazeCatalog::new(config)?.search_shows(query)?;
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &shows)?;
        writeln!(stdout)?;
    } else {
        let mut presenter = Presenter::new(summary_format);
        presenter.render_shows(Some(shows.as_slice()));
        presenter.write_shows(&mut stdout)?;
    }

    Ok(())
}

fn run_episodes(
    config: &CatalogConfig,
    summary_format: SummaryFormat,
    show_id: ShowId,
    json: bool,
) -> Result<(), ShowFinderError> {
    let episodes = TvMazeCatalog::new(config)?.get_episodes(show_id)?;
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &episodes)?;
        writeln!(stdout)?;
    } else {
        let mut presenter = Presenter::new(summary_format);
        presenter.render_episodes(&episodes);
        presenter.write_episodes(&mut stdout)?;
    }

    Ok(())
}

fn run_interactive(
    config: &CatalogConfig,
    summary_format: SummaryFormat,
) -> Result<(), ShowFinderError> {
    let mut session = open_session(config, summary_format, TerminalNotifier)?;

    println!("ShowFinder: search the TVMaze catalog. Press Ctrl+C to exit.\n");

    loop {
        let query = Input::<String>::new()
            .with_prompt("Search shows")
            .allow_empty(true)
            .interact_text()?;

        if session.submit_search(&query) == ActionOutcome::Aborted {
            continue;
        }

        println!("\n=== Shows ===\n");
        session.presenter().write_shows(&mut io::stdout().lock())?;

        if !browse_results(&mut session)? {
            return Ok(());
        }
    }
}

/// Lets the user open episode listings of the rendered cards
///
/// Returns false once the user chose to quit.
fn browse_results<P, N>(session: &mut Session<P, N>) -> Result<bool, ShowFinderError>
where
    P: CatalogProvider,
    N: Notifier,
{
    loop {
        let mut items: Vec<String> = session
            .presenter()
            .cards()
            .iter()
            .map(ShowCard::episodes_label)
            .collect();
        let new_search = items.len();
        items.push("New search".to_string());
        let quit = items.len();
        items.push("Quit".to_string());

        let choice = Select::new()
            .with_prompt("Choose an action (Esc for a new search)")
            .items(&items[..])
            .default(0)
            .interact_opt()?;

        match choice {
            None => return Ok(true),
            Some(index) if index == new_search => return Ok(true),
            Some(index) if index == quit => return Ok(false),
            Some(index) => {
                if session.activate_episodes(index) == ActionOutcome::Applied {
                    println!();
                    session.presenter().write_episodes(&mut io::stdout().lock())?;
                }
            }
        }
    }
}
