//! # Blockdeck CLI Entry Point
//!
//! Blockdeck previews block-authored content pages in the terminal. It
//! loads a page document produced by the authoring pipeline, decorates each
//! block into an interactive widget, and runs the page in a TUI. It can
//! also generate the JSON search index from authored course tables.
//!
//! ## Usage
//!
//! ```bash
//! # Preview a page
//! blockdeck --page page.json
//!
//! # Generate the search index from a content directory
//! blockdeck --index-dir ./content --out query-index.json
//!
//! # Debug mode - print decorated blocks and exit
//! blockdeck --page page.json --debug
//! ```
//!
//! ## Key Bindings
//!
//! - `q` / `Q` - Quit
//! - `Tab` - Cycle focus between interactive blocks
//! - `Enter` / `Space` - Activate the focused block (dismiss banner, open search)
//! - `/` - Open the search widget
//!
//! ### Search widget (while open)
//! - any text - edit the query (searches fire after a 300 ms pause)
//! - `Down` / `Up` - Cycle through results with wraparound
//! - `Enter` - Open the focused result, or submit the raw query
//! - `Esc` - Clear and close the widget
//!
//! Selecting a result quits the previewer and prints the target path to
//! stdout.

use blockdeck::block::{decorate_page, DecoratedBlock, Page};
use blockdeck::index;
use blockdeck::search::FileIndexFetcher;
use blockdeck::ui;
use blockdeck::ui::app::PageAreas;
use blockdeck::ui::config::Config;
use blockdeck::ui::theme::Theme;
use blockdeck::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read terminal event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Blockdeck - preview block-authored content pages in the terminal
#[derive(Parser, Debug)]
#[command(name = "blockdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Preview block-authored content pages and generate their search index", long_about = None)]
struct Args {
    /// Path to the page document to preview
    #[arg(short, long, value_name = "FILE", default_value = "page.json")]
    page: PathBuf,

    /// Generate the search index from a content directory and exit
    #[arg(long, value_name = "DIR", conflicts_with = "debug")]
    index_dir: Option<PathBuf>,

    /// Output path for the generated search index
    #[arg(long, value_name = "FILE", default_value = "query-index.json")]
    out: PathBuf,

    /// Path to the query index the search widget fetches
    #[arg(long, value_name = "FILE", default_value = "query-index.json")]
    query_index: PathBuf,

    /// Theme name (overrides the persisted configuration)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Print decorated blocks and exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    // Index generation mode: no TUI.
    if let Some(content_dir) = args.index_dir {
        let generated = index::generate_index(&content_dir)
            .with_context(|| format!("Failed to index: {}", content_dir.display()))?;
        index::write_index(&generated, &args.out)?;
        println!(
            "Indexed {} course{} into {}",
            generated.data.len(),
            if generated.data.len() == 1 { "" } else { "s" },
            args.out.display()
        );
        return Ok(());
    }

    let page = Page::load(&args.page)?;
    let decorated = decorate_page(&page);

    // Debug mode: print decorated blocks and exit
    if args.debug {
        println!("=== Page {} ===", page.path);
        for block in &decorated.blocks {
            match block {
                DecoratedBlock::AlertBanner(banner) => {
                    println!("  AlertBanner: {}", banner.message);
                }
                DecoratedBlock::Teaser(teaser) => {
                    println!(
                        "  Teaser: {} ({:?}, image {})",
                        teaser.title, teaser.layout, teaser.image
                    );
                }
            }
        }
        if let Some(ref bar) = decorated.search_bar {
            println!("  Search bar: label '{}'", bar.label);
        }
        println!("\nTotal: {} decorated blocks", decorated.blocks.len());
        return Ok(());
    }

    if decorated.blocks.is_empty() && decorated.search_bar.is_none() {
        eprintln!("Error: page has no decorable blocks");
        eprintln!("Searched in: {}", args.page.display());
        eprintln!("\nExpected a document like:");
        eprintln!(r#"  {{ "path": "/home", "blocks": [ {{ "name": "alertbanner", "rows": [[{{ "text": "Hi" }}]] }} ] }}"#);
        std::process::exit(1);
    }

    // Resolve the theme: CLI flag wins, then persisted config.
    let mut config = Config::load();
    if let Some(ref name) = args.theme {
        config.theme = name.clone();
        if let Err(e) = config.save() {
            eprintln!("Warning: could not persist theme choice: {}", e);
        }
    }
    let theme = match Theme::by_name(&config.theme) {
        Some(theme) => theme,
        None => {
            eprintln!(
                "Warning: unknown theme '{}', using {}",
                config.theme,
                Theme::default_theme().name
            );
            Theme::default_theme()
        }
    };

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let fetcher = Arc::new(FileIndexFetcher::new(args.query_index));
    let mut app = App::new(decorated, page.path.clone(), fetcher, theme.clone());

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    // Selecting a result "navigates": hand the target to stdout once the
    // terminal is back to normal.
    if let Some(path) = app.navigation.take() {
        println!("{}", path);
    }

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        // Deliver completed fetches, then fire any due debounce.
        app.drain_completions();
        app.tick(Instant::now());

        let mut areas = PageAreas::default();
        terminal
            .draw(|f| areas = ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Poll fast while a debounce is pending so the trailing edge fires
        // close to its deadline.
        let poll_timeout = if app.wants_fast_tick() {
            Duration::from_millis(30)
        } else {
            Duration::from_millis(100)
        };

        let event = match event_reader.read_event(poll_timeout)? {
            Some(e) => e,
            None => continue,
        };

        match event {
            Event::Key(key) => app.handle_key(key.code, Instant::now()),
            Event::Mouse(mouse) => app.handle_mouse(mouse, &areas, Instant::now()),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Mock event reader for testing that returns a predetermined sequence of events
    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_mock_event_reader() {
        let events = vec![key_event(KeyCode::Char('a')), key_event(KeyCode::Enter)];
        let mut reader = MockEventReader::new(events);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('a'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));
        assert!(reader
            .read_event(Duration::from_millis(10))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_run_application_missing_page() {
        let args = Args {
            page: PathBuf::from("/nonexistent/page.json"),
            index_dir: None,
            out: PathBuf::from("query-index.json"),
            query_index: PathBuf::from("query-index.json"),
            theme: None,
            debug: false,
        };

        let result = run_application(args).await;
        assert!(result.is_err());
        let err_msg = format!("{:?}", result.unwrap_err());
        assert!(err_msg.contains("Failed to read page document"));
    }

    #[tokio::test]
    async fn test_run_application_debug_mode() {
        let temp_dir = TempDir::new().unwrap();
        let page_path = temp_dir.path().join("page.json");
        fs::write(
            &page_path,
            r#"{ "path": "/home", "blocks": [ { "name": "alertbanner", "rows": [[{ "text": "Hi" }]] } ] }"#,
        )
        .unwrap();

        let args = Args {
            page: page_path,
            index_dir: None,
            out: PathBuf::from("query-index.json"),
            query_index: PathBuf::from("query-index.json"),
            theme: None,
            debug: true,
        };

        // Debug mode prints and exits without touching the terminal.
        assert!(run_application(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_application_index_mode() {
        let temp_dir = TempDir::new().unwrap();
        let content_dir = temp_dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(
            content_dir.join("courses.json"),
            r#"{
  "path": "/courses",
  "blocks": [ {
    "name": "courses-list",
    "rows": [
      [{ "text": "h" }],
      [{ "text": "h" }],
      [{ "text": "BIO101" }, { "text": "Intro to Biology" }, { "text": "Cells" },
       { "text": "UG" }, { "text": "On campus" }, { "text": "City" },
       { "text": "3 years" }, { "text": "Science" }]
    ]
  } ]
}"#,
        )
        .unwrap();
        let out = temp_dir.path().join("query-index.json");

        let args = Args {
            page: PathBuf::from("page.json"),
            index_dir: Some(content_dir),
            out: out.clone(),
            query_index: PathBuf::from("query-index.json"),
            theme: None,
            debug: false,
        };

        run_application(args).await.unwrap();

        let written = fs::read_to_string(&out).unwrap();
        let parsed: blockdeck::search::QueryIndex = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].title, "Intro to Biology");
        assert_eq!(parsed.data[0].path, "/courses");
    }

    #[tokio::test]
    async fn test_run_application_index_mode_bad_dir() {
        let args = Args {
            page: PathBuf::from("page.json"),
            index_dir: Some(PathBuf::from("/nonexistent/content")),
            out: PathBuf::from("query-index.json"),
            query_index: PathBuf::from("query-index.json"),
            theme: None,
            debug: false,
        };

        assert!(run_application(args).await.is_err());
    }
}
