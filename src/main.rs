//! tixtop - Interactive TUI dashboard for helpdesk ticket queues.
//!
//! Two modes:
//! - Live mode (default): fetch tickets from a GLPI-compatible REST backend
//! - File mode: browse a JSON export offline
//!
//! Usage:
//!   tixtop --url https://helpdesk.example/apirest.php \
//!          --app-token ... --user-token ...
//!   tixtop                          # tokens from GLPI_* environment
//!   tixtop --file export.json       # offline mode
//!   tixtop --refresh 60             # fetch at most once per minute

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use tixtop::api::HelpdeskClient;
use tixtop::config::{DashboardConfig, credentials_from_env};
use tixtop::provider::{FileProvider, LiveProvider, TicketProvider};
use tixtop::tui::App;
use tixtop::tui::style::ThemeKind;
use tixtop::tui::viewport::ViewportConfig;

/// Interactive dashboard for helpdesk ticket queues.
#[derive(Parser)]
#[command(name = "tixtop", about = "Helpdesk ticket dashboard", version)]
struct Args {
    /// Backend API URL (e.g. https://helpdesk.example/apirest.php).
    /// Falls back to GLPI_URL.
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Application token. Falls back to GLPI_APP_TOKEN.
    #[arg(long, value_name = "TOKEN")]
    app_token: Option<String>,

    /// User API token. Falls back to GLPI_USER_TOKEN.
    #[arg(long, value_name = "TOKEN")]
    user_token: Option<String>,

    /// Browse a JSON export offline instead of a live backend.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["url", "app_token", "user_token"])]
    file: Option<PathBuf>,

    /// Minimum interval between backend fetches, in seconds.
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    refresh: u64,

    /// Row count below which the whole list is rendered without windowing.
    #[arg(long, default_value_t = 100, value_name = "ROWS")]
    threshold: usize,

    /// Extra rows rendered on each edge of the visible range.
    #[arg(long, default_value_t = 4, value_name = "ROWS")]
    overscan: usize,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = ThemeKind::Dark)]
    theme: ThemeKind,

    /// Write logs to this file (stderr is owned by the TUI).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// UI tick; data refresh is throttled separately by `--refresh`.
const TICK_RATE: Duration = Duration::from_secs(1);

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path);
    }

    let provider: Box<dyn TicketProvider> = if let Some(path) = &args.file {
        match FileProvider::from_path(path) {
            Ok(p) => Box::new(p),
            Err(e) => {
                eprintln!("Error loading '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        let credentials =
            match credentials_from_env(args.url.clone(), args.app_token.clone(), args.user_token.clone()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
        let client = match HelpdeskClient::new(credentials) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error creating API client: {e}");
                std::process::exit(1);
            }
        };
        Box::new(LiveProvider::new(
            client,
            Duration::from_secs(args.refresh.max(1)),
        ))
    };

    let config = DashboardConfig {
        refresh: Duration::from_secs(args.refresh.max(1)),
        viewport: ViewportConfig {
            row_height: 1,
            overscan: args.overscan,
            full_render_threshold: args.threshold,
        },
        theme: args.theme,
    };

    let app = App::new(provider, &config);
    if let Err(e) = app.run(TICK_RATE) {
        eprintln!("Error running TUI: {e}");
        std::process::exit(1);
    }
}

/// File-based logging honoring RUST_LOG; the terminal is left to ratatui.
fn init_logging(path: &std::path::Path) {
    use tracing_subscriber::EnvFilter;

    let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening log file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
}
