use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        poll as event_poll, read as event_read, Event as CrosstermEvent, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use ratatui::Terminal;
use serde::Serialize;
use snipgrid::{
    app::App,
    clipboard::{Clipboard, CopyButtons},
    config::Config,
    filter::CategoryFilter,
    input::SearchInput,
    model::{load_catalog, CatalogSource},
    preview::PreviewRenderer,
    services::{log_dirs, tracing_setup},
    state::AppState,
    toast::ToastStack,
    tui,
    view::{build_page, html::render_document, PageSources, Theme},
};
use std::{
    io::{self, stdout, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Longest wait for input before redrawing
const MAX_POLL: Duration = Duration::from_millis(100);

const DOCUMENT_TITLE: &str = "Snippets";

/// Browse a snippet catalog: search, filter by category, preview and copy
#[derive(Parser, Debug)]
#[command(name = "snipgrid", version, about)]
struct Cli {
    /// Catalog file path or http(s) URL (overrides the config file)
    #[arg(long, value_name = "PATH|URL")]
    catalog: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (defaults to the user's state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal browser (default)
    Browse,
    /// Print the snippets matching a category and query
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the filtered catalog as a standalone HTML page
    Export {
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Category id, or "all"
    #[arg(long, default_value = "all")]
    category: String,
    /// Case-insensitive search over title, description and markdown
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Serialize)]
struct ListedSnippet<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    priority: &'static str,
    markdown: &'a str,
}

fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if let Err(e) = tracing_setup::init_global(&log_path) {
        eprintln!("Warning: could not open log file {}: {}", log_path.display(), e);
    }
    tracing::info!("snipgrid {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    let source = CatalogSource::parse(&config.catalog);

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => run_browser(&config, &source),
        Command::List { filter, json } => {
            let state = filtered_state(&source, &filter)?;
            print_list(&state, json)
        }
        Command::Export { output, filter } => {
            let state = filtered_state(&source, &filter)?;
            export_html(&config, &state, &filter.query, &output)
        }
    }
}

/// Load the catalog and apply a category and query, without debounce.
fn filtered_state(source: &CatalogSource, filter: &FilterArgs) -> AnyhowResult<AppState> {
    let catalog =
        load_catalog(source).with_context(|| format!("Failed to load catalog from {source}"))?;
    let mut state = AppState::new(catalog);

    let category = CategoryFilter::from_id(&filter.category);
    if let CategoryFilter::Id(id) = &category {
        if state.catalog().category(id).is_none() {
            tracing::warn!("Unknown category '{}'", id);
        }
    }
    state.set_category(category);
    state.set_query(filter.query.as_str());
    Ok(state)
}

fn print_list(state: &AppState, json: bool) -> AnyhowResult<()> {
    let mut out = stdout().lock();
    if json {
        let listed: Vec<ListedSnippet> = state
            .filtered()
            .map(|(_, s)| ListedSnippet {
                title: &s.title,
                description: &s.description,
                category: &s.category_name,
                priority: s.priority.as_str(),
                markdown: &s.markdown,
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &listed)?;
        writeln!(out)?;
    } else {
        for (_, s) in state.filtered() {
            writeln!(
                out,
                "{:<7}{:<16}{}  {}",
                s.priority.as_str(),
                s.category_name,
                s.title,
                s.description
            )?;
        }
    }
    Ok(())
}

fn export_html(
    config: &Config,
    state: &AppState,
    query: &str,
    output: &Path,
) -> AnyhowResult<()> {
    let search = SearchInput::with_text(query);
    let buttons = CopyButtons::new(config.copy_feedback());
    let toasts = ToastStack::new(config.toast_duration(), config.toast_exit());
    let page = build_page(PageSources {
        state,
        search: &search,
        buttons: &buttons,
        toasts: &toasts,
        selected: None,
        detail_scroll: 0,
        now: Instant::now(),
    });

    let preview = PreviewRenderer::from_config(&config.preview);
    let html = render_document(DOCUMENT_TITLE, &page, preview.as_ref());
    std::fs::write(output, html)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Exported {} snippets to {}",
        page.grid.cards().len(),
        output.display()
    );
    Ok(())
}

fn run_browser(config: &Config, source: &CatalogSource) -> AnyhowResult<()> {
    // Set up panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(config, Clipboard::system());
    app.load(load_catalog(source), Instant::now());

    // Set up terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    // Super+K only reaches us when the terminal disambiguates modifiers
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        stdout().execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
        ))?;
    }
    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut app, &mut terminal);

    // Clean up terminal
    if enhanced {
        stdout().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Main event loop
fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    let theme = Theme::default();
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| tui::draw(frame, &app.page(now), &theme))?;

        if app.should_quit() {
            break;
        }

        // Sleep until the next timer fires, but never longer than MAX_POLL
        let timeout = app
            .next_deadline(now)
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(MAX_POLL)
            .min(MAX_POLL);

        if event_poll(timeout)? {
            match event_read()? {
                CrosstermEvent::Key(key_event) => app.handle_key(key_event, Instant::now()),
                CrosstermEvent::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                _ => {
                    // Ignore other events (mouse, focus, paste)
                }
            }
        }
    }

    tracing::info!("snipgrid exiting");
    Ok(())
}
